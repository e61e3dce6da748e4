//! Request handlers. `GET /stocks/:id` is the only route that reaches the
//! enrichment provider.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;

use crate::core::catalog::StockSummary;
use crate::gateway::{DetailRecord, EnrichmentGateway, GatewayError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "Stock not found"),
        };
        debug!(error = %self, "Request failed");
        (
            status,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// GET /stocks
pub async fn list_stocks(State(gateway): State<Arc<EnrichmentGateway>>) -> Json<Vec<StockSummary>> {
    Json(gateway.list())
}

/// GET /stocks/:id
pub async fn get_stock_detail(
    State(gateway): State<Arc<EnrichmentGateway>>,
    Path(id): Path<String>,
) -> Result<Json<DetailRecord>, GatewayError> {
    let detail = gateway.get_detail(&id).await?;
    Ok(Json(detail))
}

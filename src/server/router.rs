//! Router construction for the stock service.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::gateway::EnrichmentGateway;
use crate::server::handlers;

pub fn build_router(gateway: Arc<EnrichmentGateway>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/stocks", get(handlers::list_stocks))
        .route("/stocks/:id", get(handlers::get_stock_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

use crate::core::enrichment::{EnrichmentProvider, EnrichmentResult};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the remote stock analysis service.
///
/// One `GET {base_url}/stock-analysis/{id}` per fetch, single attempt.
/// Every failure (deadline, transport, status, payload) is logged and
/// reported as [`EnrichmentResult::unavailable`].
pub struct AnalysisProvider {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    sentiment_score: f64,
    analyst_rating: String,
}

impl AnalysisProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("stockdesk/1.0")
            .build()?;
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow!("Invalid analysis base URL {}: {}", base_url, e))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid analysis base URL: {}", base_url));
        }
        Ok(AnalysisProvider { base_url, client })
    }

    /// `{base_url}/stock-analysis/{id}` with `id` escaped as a single path segment.
    fn analysis_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid analysis base URL: {}", self.base_url))?
            .pop_if_empty()
            .push("stock-analysis")
            .push(id);
        Ok(url)
    }

    async fn request(&self, id: &str, deadline: Duration) -> Result<EnrichmentResult> {
        let url = self.analysis_url(id)?;
        debug!("Requesting analysis from {}", url);

        let response = self
            .client
            .get(url)
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for stock: {}", e, id))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for stock: {}",
                response.status(),
                id
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response body for {}: {}", id, e))?;

        let data: AnalysisResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", id, e))?;

        if !(0.0..=1.0).contains(&data.sentiment_score) {
            return Err(anyhow!(
                "Sentiment score out of range for {}: {}",
                id,
                data.sentiment_score
            ));
        }

        Ok(EnrichmentResult::ok(
            data.sentiment_score,
            data.analyst_rating,
        ))
    }
}

#[async_trait]
impl EnrichmentProvider for AnalysisProvider {
    #[instrument(
        name = "AnalysisFetch",
        skip(self),
        fields(id = %id)
    )]
    async fn fetch(&self, id: &str, deadline: Duration) -> EnrichmentResult {
        // Dropping the request future on elapse closes the connection.
        match tokio::time::timeout(deadline, self.request(id, deadline)).await {
            Ok(Ok(result)) => {
                debug!(?result, "Received analysis");
                result
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Analysis unavailable");
                EnrichmentResult::unavailable()
            }
            Err(_) => {
                warn!(?deadline, "Analysis request exceeded deadline");
                EnrichmentResult::unavailable()
            }
        }
    }
}

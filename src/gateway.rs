//! Detail lookups: catalog record plus deadline-bounded enrichment.

use crate::core::catalog::{BaseRecord, CatalogStore, StockSummary};
use crate::core::enrichment::{EnrichmentProvider, EnrichmentResult, EnrichmentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub const FALLBACK_SENTIMENT_SCORE: f64 = 0.0;
pub const FALLBACK_ANALYST_RATING: &str = "N/A";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Stock not found: {0}")]
    NotFound(String),
}

/// A catalog record merged with its enrichment. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub volume: u64,
    pub market_cap: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub pe_ratio: Decimal,
    pub sentiment_score: f64,
    pub analyst_rating: String,
}

impl DetailRecord {
    /// Merges a base record with an enrichment outcome. Anything but a
    /// complete `Ok` result yields the fallback values.
    pub fn merge(base: &BaseRecord, result: EnrichmentResult) -> Self {
        let (sentiment_score, analyst_rating) =
            match (result.is_ok(), result.sentiment_score, result.analyst_rating) {
                (true, Some(score), Some(rating)) => (score, rating),
                _ => (
                    FALLBACK_SENTIMENT_SCORE,
                    FALLBACK_ANALYST_RATING.to_string(),
                ),
            };

        DetailRecord {
            id: base.id.clone(),
            name: base.name.clone(),
            price: base.price,
            volume: base.volume,
            market_cap: base.market_cap.clone(),
            pe_ratio: base.pe_ratio,
            sentiment_score,
            analyst_rating,
        }
    }
}

pub struct EnrichmentGateway {
    catalog: Arc<CatalogStore>,
    provider: Arc<dyn EnrichmentProvider>,
    deadline: Duration,
}

impl EnrichmentGateway {
    pub fn new(
        catalog: Arc<CatalogStore>,
        provider: Arc<dyn EnrichmentProvider>,
        deadline: Duration,
    ) -> Self {
        Self {
            catalog,
            provider,
            deadline,
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn list(&self) -> Vec<StockSummary> {
        self.catalog.list()
    }

    /// Looks up `id` and enriches it.
    ///
    /// Only a missing catalog entry is an error. The provider is not called
    /// for unknown ids, and is never awaited longer than the deadline.
    pub async fn get_detail(&self, id: &str) -> Result<DetailRecord, GatewayError> {
        self.get_detail_with_status(id)
            .await
            .map(|(detail, _)| detail)
    }

    /// Same as [`get_detail`](Self::get_detail), also reporting whether the
    /// enrichment succeeded or the fallback values were used.
    #[instrument(name = "GetDetail", skip(self), fields(id = %id))]
    pub async fn get_detail_with_status(
        &self,
        id: &str,
    ) -> Result<(DetailRecord, EnrichmentStatus), GatewayError> {
        let base = self
            .catalog
            .lookup(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;

        let result =
            match tokio::time::timeout(self.deadline, self.provider.fetch(id, self.deadline)).await
            {
                Ok(result) => result,
                Err(_) => {
                    warn!(deadline = ?self.deadline, "Enrichment abandoned at deadline");
                    EnrichmentResult::unavailable()
                }
            };
        let status = result.status;
        debug!(%status, "Merging enrichment");

        Ok((DetailRecord::merge(base, result), status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    struct StaticProvider {
        result: EnrichmentResult,
        calls: AtomicUsize,
    }

    impl StaticProvider {
        fn new(result: EnrichmentResult) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EnrichmentProvider for StaticProvider {
        async fn fetch(&self, _id: &str, _deadline: Duration) -> EnrichmentResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Ignores the deadline and sleeps per id before answering Ok.
    struct SleepyProvider {
        delays: HashMap<String, Duration>,
    }

    #[async_trait]
    impl EnrichmentProvider for SleepyProvider {
        async fn fetch(&self, id: &str, _deadline: Duration) -> EnrichmentResult {
            if let Some(delay) = self.delays.get(id) {
                tokio::time::sleep(*delay).await;
            }
            EnrichmentResult::ok(0.5, "Hold")
        }
    }

    const DEADLINE: Duration = Duration::from_millis(200);

    fn gateway(provider: Arc<dyn EnrichmentProvider>) -> EnrichmentGateway {
        EnrichmentGateway::new(Arc::new(CatalogStore::seeded()), provider, DEADLINE)
    }

    #[tokio::test]
    async fn test_detail_matches_base_record() {
        let catalog = CatalogStore::seeded();
        let gw = gateway(StaticProvider::new(EnrichmentResult::ok(0.7, "Buy")));

        for summary in catalog.list() {
            let base = catalog.lookup(&summary.id).unwrap();
            let detail = gw.get_detail(&summary.id).await.unwrap();
            assert_eq!(detail.id, base.id);
            assert_eq!(detail.name, base.name);
            assert_eq!(detail.price, base.price);
            assert_eq!(detail.volume, base.volume);
            assert_eq!(detail.market_cap, base.market_cap);
            assert_eq!(detail.pe_ratio, base.pe_ratio);
        }
    }

    #[tokio::test]
    async fn test_ok_enrichment_is_merged() {
        let gw = gateway(StaticProvider::new(EnrichmentResult::ok(0.95, "Strong Buy")));

        let detail = gw.get_detail("AI").await.unwrap();
        assert_eq!(detail.sentiment_score, 0.95);
        assert_eq!(detail.analyst_rating, "Strong Buy");
    }

    #[tokio::test]
    async fn test_unknown_id_skips_provider() {
        let provider = StaticProvider::new(EnrichmentResult::ok(0.95, "Strong Buy"));
        let gw = gateway(provider.clone());

        let err = gw.get_detail("NOPE").await.unwrap_err();
        assert_eq!(err, GatewayError::NotFound("NOPE".to_string()));
        assert_eq!(err.to_string(), "Stock not found: NOPE");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_falls_back() {
        let provider = StaticProvider::new(EnrichmentResult::unavailable());
        let gw = gateway(provider.clone());

        let detail = gw.get_detail("TECH").await.unwrap();
        assert_eq!(detail.sentiment_score, FALLBACK_SENTIMENT_SCORE);
        assert_eq!(detail.analyst_rating, FALLBACK_ANALYST_RATING);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_slow_provider_is_cut_at_deadline() {
        let provider = Arc::new(SleepyProvider {
            delays: HashMap::from([("TECH".to_string(), Duration::from_secs(10))]),
        });
        let gw = gateway(provider);

        let started = Instant::now();
        let detail = gw.get_detail("TECH").await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(detail.sentiment_score, 0.0);
        assert_eq!(detail.analyst_rating, "N/A");
        assert!(
            elapsed < DEADLINE + Duration::from_millis(500),
            "lookup took {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_repeated_lookups_are_identical() {
        let gw = gateway(StaticProvider::new(EnrichmentResult::ok(0.68, "Hold")));

        let first = gw.get_detail("DATA").await.unwrap();
        for _ in 0..5 {
            assert_eq!(gw.get_detail("DATA").await.unwrap(), first);
        }
    }

    #[tokio::test]
    async fn test_one_timeout_does_not_delay_others() {
        let provider = Arc::new(SleepyProvider {
            delays: HashMap::from([
                ("TECH".to_string(), Duration::from_secs(10)),
                ("AI".to_string(), Duration::from_millis(10)),
            ]),
        });
        let gw = Arc::new(gateway(provider));

        let slow = {
            let gw = Arc::clone(&gw);
            tokio::spawn(async move { gw.get_detail("TECH").await })
        };
        let fast = {
            let gw = Arc::clone(&gw);
            tokio::spawn(async move {
                let started = Instant::now();
                let detail = gw.get_detail("AI").await;
                (detail, started.elapsed())
            })
        };

        let (fast_detail, fast_elapsed) = fast.await.unwrap();
        let fast_detail = fast_detail.unwrap();
        assert_eq!(fast_detail.analyst_rating, "Hold");
        assert!(fast_elapsed < DEADLINE, "fast lookup took {fast_elapsed:?}");

        let slow_detail = slow.await.unwrap().unwrap();
        assert_eq!(slow_detail.analyst_rating, "N/A");
    }

    #[test]
    fn test_merge_incomplete_ok_falls_back() {
        let catalog = CatalogStore::seeded();
        let base = catalog.lookup("VR").unwrap();
        let partial = EnrichmentResult {
            sentiment_score: None,
            ..EnrichmentResult::ok(0.78, "Buy")
        };

        let detail = DetailRecord::merge(base, partial);
        assert_eq!(detail.sentiment_score, 0.0);
        assert_eq!(detail.analyst_rating, "N/A");
    }

    #[test]
    fn test_detail_json_shape() {
        let catalog = CatalogStore::seeded();
        let detail = DetailRecord::merge(
            catalog.lookup("AI").unwrap(),
            EnrichmentResult::ok(0.95, "Strong Buy"),
        );

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "AI",
                "name": "Artificial Intelligence Co",
                "price": 142.75,
                "volume": 25000000,
                "market_cap": "1.8T",
                "pe_ratio": 27.8,
                "sentiment_score": 0.95,
                "analyst_rating": "Strong Buy"
            })
        );
    }

    #[tokio::test]
    async fn test_status_distinguishes_real_na_rating_from_fallback() {
        let gw = gateway(StaticProvider::new(EnrichmentResult::ok(0.0, "N/A")));
        let (detail, status) = gw.get_detail_with_status("DATA").await.unwrap();
        assert_eq!(detail.analyst_rating, "N/A");
        assert_eq!(status, EnrichmentStatus::Ok);

        let slow = Arc::new(SleepyProvider {
            delays: HashMap::from([("DATA".to_string(), Duration::from_secs(10))]),
        });
        let (detail, status) = gateway(slow).get_detail_with_status("DATA").await.unwrap();
        assert_eq!(detail.analyst_rating, "N/A");
        assert_eq!(status, EnrichmentStatus::Unavailable);
    }

    #[test]
    fn test_list_passes_through_catalog() {
        let gw = gateway(StaticProvider::new(EnrichmentResult::unavailable()));
        assert_eq!(gw.list(), CatalogStore::seeded().list());
        assert_eq!(gw.deadline(), DEADLINE);
    }
}

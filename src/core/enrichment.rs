//! Enrichment abstractions and core types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrichmentStatus {
    Ok,
    Unavailable,
}

impl Display for EnrichmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EnrichmentStatus::Ok => "ok",
                EnrichmentStatus::Unavailable => "unavailable",
            }
        )
    }
}

/// Outcome of one enrichment attempt for a single stock.
///
/// An `Ok` result always carries both a score and a rating; an
/// `Unavailable` result carries neither. Use the constructors to keep it
/// that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub status: EnrichmentStatus,
    pub sentiment_score: Option<f64>,
    pub analyst_rating: Option<String>,
}

impl EnrichmentResult {
    pub fn ok(sentiment_score: f64, analyst_rating: impl Into<String>) -> Self {
        Self {
            status: EnrichmentStatus::Ok,
            sentiment_score: Some(sentiment_score),
            analyst_rating: Some(analyst_rating.into()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            status: EnrichmentStatus::Unavailable,
            sentiment_score: None,
            analyst_rating: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == EnrichmentStatus::Ok
    }
}

/// Source of per-stock enrichment data.
///
/// Implementations must not take longer than `deadline` and must turn every
/// failure into [`EnrichmentResult::unavailable`]; there is no error channel.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    async fn fetch(&self, id: &str, deadline: Duration) -> EnrichmentResult;
}

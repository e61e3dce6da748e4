//! Core business logic abstractions

pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod log;

// Re-export main types for cleaner imports
pub use catalog::{BaseRecord, CatalogError, CatalogStore, StockSummary};
pub use enrichment::{EnrichmentProvider, EnrichmentResult, EnrichmentStatus};

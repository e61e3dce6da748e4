//! Read-only stock catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub volume: u64,
    pub market_cap: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub pe_ratio: Decimal,
}

/// List projection of a [`BaseRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&BaseRecord> for StockSummary {
    fn from(record: &BaseRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            price: record.price,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate stock id in catalog: {0}")]
    DuplicateId(String),
}

/// Immutable mapping from stock id to its [`BaseRecord`].
///
/// Records keep their insertion order for listing; lookups go through an
/// id index. Nothing mutates the store after construction, so it is shared
/// across requests behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    records: Vec<BaseRecord>,
    index: HashMap<String, usize>,
}

impl CatalogStore {
    pub fn from_records(records: Vec<BaseRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records, index })
    }

    /// Catalog built from the fixed seed set.
    pub fn seeded() -> Self {
        let records = seed_records();
        let index = records
            .iter()
            .enumerate()
            .map(|(pos, record)| (record.id.clone(), pos))
            .collect();
        Self { records, index }
    }

    pub fn lookup(&self, id: &str) -> Option<&BaseRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn list(&self) -> Vec<StockSummary> {
        self.records.iter().map(StockSummary::from).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn record(
    id: &str,
    name: &str,
    price_cents: i64,
    volume: u64,
    market_cap: &str,
    pe_tenths: i64,
) -> BaseRecord {
    BaseRecord {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::new(price_cents, 2),
        volume,
        market_cap: market_cap.to_string(),
        pe_ratio: Decimal::new(pe_tenths, 1),
    }
}

pub fn seed_records() -> Vec<BaseRecord> {
    vec![
        record("TECH", "TechCorp Industries", 17550, 75_000_000, "2.8T", 285),
        record("CLOUD", "CloudNine Systems", 37525, 45_000_000, "2.9T", 352),
        record("AI", "Artificial Intelligence Co", 14275, 25_000_000, "1.8T", 278),
        record("DATA", "DataFlow Technologies", 17890, 35_000_000, "1.9T", 623),
        record("VR", "Virtual Reality Labs", 48530, 15_000_000, "1.2T", 331),
    ]
}

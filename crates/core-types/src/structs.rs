use crate::enums::AssetId;
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single row of price history, as read from the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub symbol: String,
    pub price: Decimal,
}

impl PriceRecord {
    pub fn new(timestamp: i64, symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            timestamp,
            symbol: symbol.into(),
            price,
        }
    }
}

/// Price summary over a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub oldest: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub newest: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub min: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max: Decimal,
}

/// Statistics for one asset over a time window.
///
/// All optional fields are `None` when the window holds no records. That is a
/// valid result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeStats {
    pub asset_id: AssetId,
    pub earliest_timestamp: Option<i64>,
    pub latest_timestamp: Option<i64>,
    pub price_stats: Option<PriceStats>,
}

impl TimeRangeStats {
    pub fn empty(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            earliest_timestamp: None,
            latest_timestamp: None,
            price_stats: None,
        }
    }
}

/// A [`TimeRangeStats`] together with its normalized price range, `(max - min) / min`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStats {
    pub stats: TimeRangeStats,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub normalized_range: Option<Decimal>,
}

/// A half-open interval `[from, until)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: i64,
    pub until: i64,
}

impl TimeWindow {
    pub fn new(from: i64, until: i64) -> Result<Self, CoreError> {
        if from > until {
            return Err(CoreError::InvalidInput(
                "time window".to_string(),
                format!("start {} is after end {}", from, until),
            ));
        }
        Ok(Self { from, until })
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.from <= timestamp && timestamp < self.until
    }
}

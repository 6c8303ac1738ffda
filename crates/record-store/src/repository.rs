use crate::error::StoreError;
use async_trait::async_trait;
use core_types::{AssetId, PriceRecord, TimeWindow};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Read access to price history, one series per asset.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the asset's records with `window.from <= timestamp < window.until`,
    /// newest first.
    ///
    /// Fails with [`StoreError::NotFound`] when the asset has no backing data at
    /// all. A window that simply holds no records yields an empty `Vec`.
    async fn fetch(
        &self,
        asset: AssetId,
        window: TimeWindow,
    ) -> Result<Vec<PriceRecord>, StoreError>;
}

/// A store backed by one CSV file per asset: `<dir>/<SYMBOL><suffix>`.
///
/// Each file starts with a header line followed by `timestamp,symbol,price`
/// rows. Rows that cannot be parsed are skipped.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    dir: PathBuf,
    file_suffix: String,
}

impl CsvRecordStore {
    pub fn new(dir: impl Into<PathBuf>, file_suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_suffix: file_suffix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds the given asset's history.
    pub fn path_for(&self, asset: AssetId) -> PathBuf {
        self.dir.join(format!("{}{}", asset.symbol(), self.file_suffix))
    }
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    async fn fetch(
        &self,
        asset: AssetId,
        window: TimeWindow,
    ) -> Result<Vec<PriceRecord>, StoreError> {
        let path = self.path_for(asset);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { asset, path });
            }
            Err(source) => return Err(StoreError::Read { asset, source }),
        };

        let mut records = parse_records(asset, &bytes, window)?;
        sort_newest_first(&mut records);
        Ok(records)
    }
}

/// Parses a whole price file, keeping the rows that fall inside `window`.
fn parse_records(
    asset: AssetId,
    bytes: &[u8],
    window: TimeWindow,
) -> Result<Vec<PriceRecord>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => match e.into_kind() {
                csv::ErrorKind::Io(source) => return Err(StoreError::Read { asset, source }),
                _ => {
                    skipped += 1;
                    continue;
                }
            },
        };

        match parse_row(&row) {
            Some(record) if window.contains(record.timestamp) => records.push(record),
            Some(_) => {}
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(%asset, skipped, "Skipped unparseable price rows.");
    }
    Ok(records)
}

/// Converts one CSV row into a record, or `None` if any column is malformed.
fn parse_row(row: &csv::StringRecord) -> Option<PriceRecord> {
    if row.len() != 3 {
        return None;
    }
    let timestamp = row.get(0)?.parse::<i64>().ok()?;
    let symbol = row.get(1)?;
    let raw_price = row.get(2)?;
    let price = Decimal::from_str(raw_price)
        .or_else(|_| Decimal::from_scientific(raw_price))
        .ok()?;
    if price < Decimal::ZERO {
        return None;
    }
    Some(PriceRecord::new(timestamp, symbol, price))
}

// Stable, so rows sharing a timestamp keep their file order.
fn sort_newest_first(records: &mut [PriceRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// A store that serves fixed, in-memory series. Assets without a series
/// behave like assets without a backing file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    series: HashMap<AssetId, Vec<PriceRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the series for `asset`. Order does not matter.
    pub fn with_series(mut self, asset: AssetId, records: Vec<PriceRecord>) -> Self {
        self.series.insert(asset, records);
        self
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch(
        &self,
        asset: AssetId,
        window: TimeWindow,
    ) -> Result<Vec<PriceRecord>, StoreError> {
        let series = self.series.get(&asset).ok_or_else(|| StoreError::NotFound {
            asset,
            path: PathBuf::from(format!("memory://{}", asset)),
        })?;

        let mut records: Vec<PriceRecord> = series
            .iter()
            .filter(|r| window.contains(r.timestamp))
            .cloned()
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }
}

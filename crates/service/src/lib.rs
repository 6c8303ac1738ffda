//! # Stats Query Service
//!
//! The entry point for every price-statistics query. It turns a request
//! ("last month for ETH", "top assets 3 months ago", "leader on 2022-01-13")
//! into a time window, reads the store, and runs the statistics and ranking
//! engines over the result.
//!
//! Single-asset queries surface store failures. Aggregate queries are best
//! effort: an asset whose lookup fails is left out of the result.

use analytics::StatsEngine;
use analyzer::Analyzer;
use chrono::{Local, NaiveDate};
use core_types::{AssetId, RankedStats, TimeRangeStats, TimeWindow};
use record_store::RecordStore;
use std::sync::Arc;

pub mod error;
pub mod window;

pub use error::ServiceError;

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn RecordStore>,
    engine: StatsEngine,
    analyzer: Analyzer,
}

impl StatsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            engine: StatsEngine::new(),
            analyzer: Analyzer::new(),
        }
    }

    /// Stats for `asset` over the month-long window ending `months_back`
    /// months ago. `months_back = 0` is the last month up to now.
    ///
    /// A window without records is a successful, empty result. Only a missing
    /// data source (`NotFound`) or a read failure (`Internal`) is an error.
    pub async fn asset_info(
        &self,
        asset: AssetId,
        months_back: u32,
    ) -> Result<TimeRangeStats, ServiceError> {
        let window = window::month_window(&Local::now(), months_back)?;
        self.stats_in_window(asset, window).await
    }

    /// Stats for `asset` over an explicit window.
    pub async fn stats_in_window(
        &self,
        asset: AssetId,
        window: TimeWindow,
    ) -> Result<TimeRangeStats, ServiceError> {
        let records = self
            .store
            .fetch(asset, window)
            .await
            .map_err(|e| ServiceError::from_store(asset, e))?;
        Ok(self.engine.calculate(asset, &records))
    }

    /// Every asset with a normalized range in `window`, highest first.
    ///
    /// Assets that fail to load, have no records, or have a zero minimum
    /// price are omitted. Nothing reports which ones were skipped.
    pub async fn top_ranked(&self, window: TimeWindow) -> Vec<RankedStats> {
        let mut found = Vec::with_capacity(AssetId::ALL.len());
        for asset in AssetId::ALL {
            match self.stats_in_window(asset, window).await {
                Ok(stats) => found.push(stats),
                Err(e) => tracing::debug!(%asset, error = %e, "Skipping asset in ranking."),
            }
        }
        self.analyzer.rank(found)
    }

    /// [`top_ranked`](Self::top_ranked) over the same month window as
    /// [`asset_info`](Self::asset_info).
    pub async fn top_ranked_months_back(
        &self,
        months_back: u32,
    ) -> Result<Vec<RankedStats>, ServiceError> {
        let window = window::month_window(&Local::now(), months_back)?;
        Ok(self.top_ranked(window).await)
    }

    /// The asset with the highest normalized range on `date` (local time),
    /// or `None` when no asset has data that day.
    pub async fn daily_leader(
        &self,
        date: NaiveDate,
    ) -> Result<Option<RankedStats>, ServiceError> {
        let window = window::day_window(date, &Local)?;
        Ok(self.top_ranked(window).await.into_iter().next())
    }
}

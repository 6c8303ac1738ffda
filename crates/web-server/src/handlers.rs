use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use chrono::Local;
use core_types::{AssetId, RankedStats, TimeRangeStats};
use serde::Deserialize;
use service::window;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct MonthsParams {
    #[serde(rename = "monthsBefore")]
    months_before: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DayParams {
    date: Option<String>,
}

/// # GET /assets/top
/// All assets ranked by normalized price range over a month-long window.
pub async fn get_top_assets(
    State(state): State<Arc<AppState>>,
    params: Result<Query<MonthsParams>, QueryRejection>,
) -> Result<Json<Vec<RankedStats>>, AppError> {
    let months_back = months_back(params)?;
    let ranked = state.service.top_ranked_months_back(months_back).await?;
    Ok(Json(ranked))
}

/// # GET /assets/:asset_id/info
/// Oldest/newest/min/max prices for one asset over a month-long window.
pub async fn get_asset_info(
    Path(asset_id): Path<String>,
    State(state): State<Arc<AppState>>,
    params: Result<Query<MonthsParams>, QueryRejection>,
) -> Result<Json<TimeRangeStats>, AppError> {
    // Names outside the supported set are reported exactly like a supported
    // asset without a data file.
    let asset: AssetId = asset_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("No data exists for {}", asset_id)))?;
    let months_back = months_back(params)?;
    let stats = state.service.asset_info(asset, months_back).await?;
    Ok(Json(stats))
}

/// # GET /assets/dayTop
/// The asset with the highest normalized range on one day. `date` is either
/// an ISO date (`2022-01-13`) or epoch milliseconds, and defaults to today.
pub async fn get_day_top_asset(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DayParams>, QueryRejection>,
) -> Result<Json<RankedStats>, AppError> {
    let Query(params) = params.map_err(|r| AppError::BadRequest(r.body_text()))?;
    // An empty `date=` means the same as leaving it out.
    let date = match params.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => window::parse_date(raw, &Local)?,
        _ => Local::now().date_naive(),
    };

    state
        .service
        .daily_leader(date)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No data found for any asset for given date: {}",
                date.format("%Y-%m-%d")
            ))
        })
}

fn months_back(params: Result<Query<MonthsParams>, QueryRejection>) -> Result<u32, AppError> {
    let Query(params) = params.map_err(|r| AppError::BadRequest(r.body_text()))?;
    let months = match params.months_before.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.parse::<i64>().map_err(|e| {
            AppError::BadRequest(format!("monthsBefore: '{}' is not a number: {}", raw, e))
        })?,
        _ => 0,
    };
    if months < 0 {
        return Err(AppError::BadRequest(
            "monthsBefore: must be greater than or equal to 0".to_string(),
        ));
    }
    u32::try_from(months)
        .map_err(|_| AppError::BadRequest(format!("monthsBefore: {} is out of range", months)))
}

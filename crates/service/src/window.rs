//! Calendar arithmetic for query windows.
//!
//! Windows are computed from local wall-clock time and then converted to
//! epoch milliseconds, truncated to whole seconds.

use crate::error::ServiceError;
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use core_types::TimeWindow;

/// The month-long window ending `months_back` months before `now`.
///
/// `months_back = 0` is `[now - 1 month, now)`. Days past the end of a
/// shorter month are clamped, so March 31st minus one month is the last day
/// of February.
pub fn month_window<Tz: TimeZone>(
    now: &DateTime<Tz>,
    months_back: u32,
) -> Result<TimeWindow, ServiceError> {
    let tz = now.timezone();
    let local = now.naive_local();
    let older = months_back
        .checked_add(1)
        .ok_or_else(|| out_of_range(months_back))?;

    let from = epoch_millis(&tz, months_before(local, older)?)?;
    let until = epoch_millis(&tz, months_before(local, months_back)?)?;
    Ok(TimeWindow::new(from, until)?)
}

/// `[start of date, start of the next day)` in `tz`.
pub fn day_window<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<TimeWindow, ServiceError> {
    let next = date
        .succ_opt()
        .ok_or_else(|| ServiceError::InvalidWindow(format!("no day follows {}", date)))?;

    let from = epoch_millis(tz, date.and_time(NaiveTime::MIN))?;
    let until = epoch_millis(tz, next.and_time(NaiveTime::MIN))?;
    Ok(TimeWindow::new(from, until)?)
}

/// The calendar date in `tz` of an epoch-millisecond instant.
pub fn date_of_epoch_millis<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
}

/// Parses a day given either as epoch milliseconds (resolved to a date in
/// `tz`) or as an ISO `YYYY-MM-DD` date.
pub fn parse_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<NaiveDate, ServiceError> {
    let raw = raw.trim();
    if let Ok(millis) = raw.parse::<i64>() {
        return date_of_epoch_millis(millis, tz).ok_or_else(|| {
            ServiceError::InvalidDate(format!("epoch milliseconds {} are out of range", millis))
        });
    }
    if !is_iso_date_shape(raw) {
        return Err(ServiceError::InvalidDate(format!(
            "text '{}' could not be parsed: expected YYYY-MM-DD",
            raw
        )));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ServiceError::InvalidDate(format!("text '{}' could not be parsed: {}", raw, e)))
}

// Zero-padded `YYYY-MM-DD`; chrono alone also accepts `2022-1-13`.
fn is_iso_date_shape(raw: &str) -> bool {
    raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn months_before(at: NaiveDateTime, months: u32) -> Result<NaiveDateTime, ServiceError> {
    at.checked_sub_months(Months::new(months))
        .ok_or_else(|| out_of_range(months))
}

fn out_of_range(months: u32) -> ServiceError {
    ServiceError::InvalidWindow(format!("{} months back is out of range", months))
}

/// Resolves a local date-time to epoch milliseconds.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times inside
/// a gap (clocks going forward) are moved forward by an hour.
fn epoch_millis<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Result<i64, ServiceError> {
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            local
                .checked_add_signed(TimeDelta::hours(1))
                .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        })
        .map(|dt| dt.timestamp() * 1000)
        .ok_or_else(|| {
            ServiceError::InvalidWindow(format!("{} does not exist in the local timezone", local))
        })
}

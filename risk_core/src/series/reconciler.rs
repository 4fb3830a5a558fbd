use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::price_point::PricePoint;
use super::price_series::Series;
use crate::common::risk_exception::{ErrCode, RiskException};

/// Inclusive date range the recent feed has to cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecentWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RecentWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Range the recent feed should be asked for: the day after the last usable
/// historical row through `today`. `None` when the history already reaches
/// `today`.
pub fn recent_window(
    historical: &[PricePoint],
    today: NaiveDate,
) -> Result<Option<RecentWindow>, RiskException> {
    let last = historical
        .iter()
        .filter(|p| p.is_usable())
        .map(|p| p.date)
        .max()
        .ok_or_else(|| RiskException::new("historical feed has no usable rows", ErrCode::EmptySeries))?;

    Ok(last
        .succ_opt()
        .filter(|start| *start <= today)
        .map(|start| RecentWindow { start, end: today }))
}

/// Merge the long-history feed, the recent feed and the latest tick.
///
/// Placeholder rows (value <= 0) are dropped from `historical` only. On a date
/// present in both feeds the historical row wins. The tick is always appended
/// last, even when it repeats the previous row's date. A tick dated before the
/// last merged row is appended on that row's date.
pub fn reconcile(
    historical: &[PricePoint],
    recent: &[PricePoint],
    latest_tick: &PricePoint,
) -> Result<Series, RiskException> {
    if !latest_tick.is_usable() {
        return Err(RiskException::new(
            format!("latest tick {} value={} is not a positive price", latest_tick.date, latest_tick.value),
            ErrCode::InvalidTick,
        ));
    }

    let mut merged: Vec<PricePoint> = historical.iter().filter(|p| p.is_usable()).copied().collect();
    if merged.is_empty() {
        return Err(RiskException::new(
            format!("historical feed has no usable rows out of {}", historical.len()),
            ErrCode::EmptySeries,
        ));
    }
    let usable = merged.len();
    merged.sort_by_key(|p| p.date);

    merged.extend_from_slice(recent);

    let mut seen = HashSet::with_capacity(merged.len());
    merged.retain(|p| seen.insert(p.date));
    merged.sort_by_key(|p| p.date);

    debug!(
        historical = historical.len(),
        usable,
        recent = recent.len(),
        merged = merged.len(),
        "reconciled feeds"
    );

    let date = merged.last().map_or(latest_tick.date, |p| p.date.max(latest_tick.date));
    merged.push(PricePoint::new(date, latest_tick.value));
    Series::new(merged)
}

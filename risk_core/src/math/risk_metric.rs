use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::moving_average::MovingAverage;
use super::risk_table::{RiskLevel, RiskTable};
use crate::common::enums::RiskZone;
use crate::common::risk_exception::{ErrCode, RiskException};
use crate::common::utils::{is_positive_price, round_half_even};
use crate::series::price_series::Series;

pub const DEFAULT_WINDOW: usize = 365;
pub const DEFAULT_DIMINISHING_FACTOR: f64 = 0.395;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnotatedPoint {
    pub age_index: usize,
    pub date: NaiveDate,
    pub value: f64,
    pub moving_average: f64,
    pub adjusted_deviation: f64,
    pub risk: f64,
    pub zone: RiskZone,
}

/// Weight `index^factor` applied to the log deviation; zero at index 0
fn age_weight(age_index: usize, diminishing_factor: f64) -> f64 {
    (age_index as f64).powf(diminishing_factor)
}

/// Log distance of `value` from its moving average, scaled up with age
pub fn adjusted_deviation(value: f64, moving_average: f64, age_index: usize, diminishing_factor: f64) -> f64 {
    if age_index == 0 {
        return 0.0;
    }
    (value.ln() - moving_average.ln()) * age_weight(age_index, diminishing_factor)
}

/// Output of one transform run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetric {
    pub annotated: Vec<AnnotatedPoint>,
    pub table: RiskTable,
    pub run_min: f64,
    pub run_max: f64,
    pub diminishing_factor: f64,
}

impl RiskMetric {
    pub fn last(&self) -> &AnnotatedPoint {
        // a RiskMetric is only built from a series with at least two points
        &self.annotated[self.annotated.len() - 1]
    }

    /// Risk the given price would score at the latest index, holding the
    /// latest moving average and the series extrema fixed.
    pub fn risk_at_price(&self, price: f64) -> Result<f64, RiskException> {
        if !is_positive_price(price) {
            return Err(RiskException::new(
                format!("price={} is not a positive price", price),
                ErrCode::ParaError,
            ));
        }
        let last = self.last();
        let deviation = adjusted_deviation(price, last.moving_average, last.age_index, self.diminishing_factor);
        Ok((deviation - self.run_min) / (self.run_max - self.run_min))
    }
}

/// Moving average -> adjusted log deviation -> min-max risk -> inverse table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskTransform {
    window: usize,
    diminishing_factor: f64,
}

impl Default for RiskTransform {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            diminishing_factor: DEFAULT_DIMINISHING_FACTOR,
        }
    }
}

impl RiskTransform {
    pub fn new(window: usize, diminishing_factor: f64) -> Result<Self, RiskException> {
        if window == 0 {
            return Err(RiskException::new("window must be > 0", ErrCode::ParaError));
        }
        if !(diminishing_factor > 0.0 && diminishing_factor < 1.0) {
            return Err(RiskException::new(
                format!("diminishing_factor={} must be in (0, 1)", diminishing_factor),
                ErrCode::ParaError,
            ));
        }
        Ok(Self {
            window,
            diminishing_factor,
        })
    }

    pub fn apply(&self, series: &Series) -> Result<RiskMetric, RiskException> {
        if series.len() < 2 {
            return Err(RiskException::new(
                "risk table needs a last index > 0, series has a single point",
                ErrCode::UndefinedInverse,
            ));
        }

        let mut ma_model = MovingAverage::new(self.window);
        let mut rows = Vec::with_capacity(series.len());
        for (age_index, point) in series.iter().enumerate() {
            let moving_average = ma_model.add(point.value);
            let deviation = adjusted_deviation(point.value, moving_average, age_index, self.diminishing_factor);
            rows.push((age_index, point, moving_average, deviation));
        }

        let (run_min, run_max) = rows
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), row| (lo.min(row.3), hi.max(row.3)));
        if !(run_max > run_min) {
            return Err(RiskException::new(
                format!("adjusted deviation spans [{}, {}], cannot normalize", run_min, run_max),
                ErrCode::DegenerateRange,
            ));
        }
        let span = run_max - run_min;
        debug!(points = rows.len(), run_min, run_max, "adjusted deviation extrema");

        let annotated: Vec<AnnotatedPoint> = rows
            .into_iter()
            .map(|(age_index, point, moving_average, adjusted_deviation)| {
                let risk = (adjusted_deviation - run_min) / span;
                AnnotatedPoint {
                    age_index,
                    date: point.date,
                    value: point.value,
                    moving_average,
                    adjusted_deviation,
                    risk,
                    zone: RiskZone::from_risk(risk),
                }
            })
            .collect();

        let table = self.inverse_table(&annotated[annotated.len() - 1], run_min, run_max)?;

        Ok(RiskMetric {
            annotated,
            table,
            run_min,
            run_max,
            diminishing_factor: self.diminishing_factor,
        })
    }

    /// Solve the forward transform for the price at each fixed risk level,
    /// evaluated at the last point's age and moving average.
    fn inverse_table(&self, last: &AnnotatedPoint, run_min: f64, run_max: f64) -> Result<RiskTable, RiskException> {
        if last.age_index == 0 {
            return Err(RiskException::new(
                "cannot invert at index 0: age weight is zero",
                ErrCode::UndefinedInverse,
            ));
        }
        let weight = age_weight(last.age_index, self.diminishing_factor);
        let trend = last.moving_average.ln();

        let mut table = RiskTable::default();
        for level in RiskLevel::all() {
            let deviation = level.as_f64() * (run_max - run_min) + run_min;
            let implied_price = round_half_even((deviation / weight + trend).exp(), 0);
            table.insert(level, implied_price);
        }
        Ok(table)
    }
}

use std::ops::Index;

use serde::Serialize;

use super::price_point::PricePoint;
use crate::common::risk_exception::{ErrCode, RiskException};

/// Date-ordered price series handed to the risk transform.
///
/// Position in the series is the age index used by the diminishing-returns
/// exponent, so construction checks ordering:
/// - at least one point
/// - every value finite and > 0
/// - dates non-decreasing, with a repeated date allowed only for the final
///   row (the appended live tick)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    lst: Vec<PricePoint>,
}

impl Series {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, RiskException> {
        let series = Self { lst: points };
        series.check()?;
        Ok(series)
    }

    fn check(&self) -> Result<(), RiskException> {
        if self.lst.is_empty() {
            return Err(RiskException::new(
                "series has no points",
                ErrCode::EmptySeries,
            ));
        }

        for (idx, point) in self.lst.iter().enumerate() {
            if !point.is_usable() {
                return Err(RiskException::new(
                    format!("{} value={} at index {} is not a positive price", point.date, point.value, idx),
                    ErrCode::InvalidSeries,
                ));
            }
        }

        let last_pair = self.lst.len().saturating_sub(2);
        for (idx, pair) in self.lst.windows(2).enumerate() {
            let (prev, cur) = (&pair[0], &pair[1]);
            if cur.date < prev.date {
                return Err(RiskException::new(
                    format!("{} at index {} comes before {}", cur.date, idx + 1, prev.date),
                    ErrCode::InvalidSeries,
                ));
            }
            if cur.date == prev.date && idx != last_pair {
                return Err(RiskException::new(
                    format!("duplicate date {} at index {}", cur.date, idx + 1),
                    ErrCode::InvalidSeries,
                ));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lst.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.lst.last()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.lst
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.lst.iter()
    }
}

impl Index<usize> for Series {
    type Output = PricePoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lst[index]
    }
}

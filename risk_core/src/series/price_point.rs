use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::common::utils::is_positive_price;

/// One daily observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Feeds use value <= 0 as a "no data" placeholder
    pub fn is_usable(&self) -> bool {
        is_positive_price(self.value)
    }
}

/// Latest intraday trade, as delivered by the tick collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub observed_at: NaiveDateTime,
    pub value: f64,
}

impl Tick {
    pub fn new(observed_at: NaiveDateTime, value: f64) -> Self {
        Self { observed_at, value }
    }

    pub fn to_point(&self) -> PricePoint {
        PricePoint::new(self.observed_at.date(), self.value)
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Number of inverse-table levels: 0.0, 0.1, ..., 0.9
pub const RISK_LEVEL_COUNT: u8 = 10;

/// A risk level stored as whole tenths, so table keys compare exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "f64")]
pub struct RiskLevel(u8);

impl RiskLevel {
    pub fn from_tenths(tenths: u8) -> Option<Self> {
        (tenths < RISK_LEVEL_COUNT).then_some(Self(tenths))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..RISK_LEVEL_COUNT).map(Self)
    }

    pub fn tenths(&self) -> u8 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl From<RiskLevel> for f64 {
    fn from(level: RiskLevel) -> Self {
        level.as_f64()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f64())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskPriceEntry {
    pub risk_level: RiskLevel,
    pub implied_price: f64,
}

/// Price implied by each risk level at the latest point of the series
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskTable {
    prices: BTreeMap<RiskLevel, f64>,
}

impl RiskTable {
    pub(crate) fn insert(&mut self, level: RiskLevel, implied_price: f64) {
        self.prices.insert(level, implied_price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Entries in ascending risk order
    pub fn entries(&self) -> impl Iterator<Item = RiskPriceEntry> + '_ {
        self.prices.iter().map(|(&risk_level, &implied_price)| RiskPriceEntry {
            risk_level,
            implied_price,
        })
    }
}

impl Serialize for RiskTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}

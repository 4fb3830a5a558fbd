use serde::Serialize;

use crate::common::enums::RiskZone;
use crate::common::utils::round_half_even;

/// Horizontal risk band drawn behind the risk line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskBand {
    pub lower: f64,
    pub upper: f64,
    pub zone: RiskZone,
    /// `None` for the undrawn band
    pub opacity: Option<f64>,
}

impl RiskBand {
    fn from_tenths(lower: u8, zone: RiskZone, opacity: Option<f64>) -> Self {
        Self {
            lower: f64::from(lower) / 10.0,
            upper: f64::from(lower + 1) / 10.0,
            zone,
            opacity,
        }
    }
}

/// The ten tenth-wide bands covering [0, 1], lowest first.
///
/// Green shades deepen towards 0 (0.25 at [0.4, 0.5] up to 0.45 at [0, 0.1]),
/// [0.5, 0.6] stays blank, red deepens towards 1 (0.3 up to 0.6).
pub fn risk_bands() -> Vec<RiskBand> {
    let mut bands = Vec::with_capacity(10);

    for lower in 0..5u8 {
        let steps_from_mid = f64::from(5 - lower);
        let opacity = round_half_even(0.2 + 0.05 * steps_from_mid, 2);
        bands.push(RiskBand::from_tenths(lower, RiskZone::Accumulation, Some(opacity)));
    }

    bands.push(RiskBand::from_tenths(5, RiskZone::Neutral, None));

    for lower in 6..10u8 {
        let steps_from_mid = f64::from(lower - 5);
        let opacity = round_half_even(0.2 + 0.1 * steps_from_mid, 2);
        bands.push(RiskBand::from_tenths(lower, RiskZone::Distribution, Some(opacity)));
    }

    bands
}

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Chart zone a risk score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum RiskZone {
    /// Below 0.5, drawn in green
    #[strum(serialize = "accumulation")]
    Accumulation,
    /// [0.5, 0.6), left undrawn
    #[strum(serialize = "neutral")]
    Neutral,
    /// 0.6 and above, drawn in red
    #[strum(serialize = "distribution")]
    Distribution,
}

impl RiskZone {
    pub fn from_risk(risk: f64) -> Self {
        if risk < 0.5 {
            RiskZone::Accumulation
        } else if risk < 0.6 {
            RiskZone::Neutral
        } else {
            RiskZone::Distribution
        }
    }
}

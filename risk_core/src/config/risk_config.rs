use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::common::risk_exception::{ErrCode, RiskException};
use crate::math::risk_metric::{RiskTransform, DEFAULT_DIMINISHING_FACTOR, DEFAULT_WINDOW};

/// Risk metric configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// Moving average length in rows
    pub window: usize,
    /// Exponent of the age weight, in (0, 1)
    pub diminishing_factor: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            diminishing_factor: DEFAULT_DIMINISHING_FACTOR,
        }
    }
}

impl RiskConfig {
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self, RiskException> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();

        let config = Self {
            window: conf.get("window")?.unwrap_or(default.window),
            diminishing_factor: conf.get("diminishing_factor")?.unwrap_or(default.diminishing_factor),
        };

        conf.check()?;
        config.transform()?;

        Ok(config)
    }

    /// Build the transform, validating window and factor
    pub fn transform(&self) -> Result<RiskTransform, RiskException> {
        RiskTransform::new(self.window, self.diminishing_factor)
    }
}

/// Raw key/value config that tracks which keys have been consumed
struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, RiskException> {
        match self.conf.remove(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v).map(Some).map_err(|e| {
                RiskException::new(format!("bad value for {}: {}", key, e), ErrCode::ConfigError)
            }),
        }
    }

    /// Fail on any key nobody asked for
    fn check(&self) -> Result<(), RiskException> {
        if self.conf.is_empty() {
            return Ok(());
        }
        let mut unknown: Vec<&str> = self.conf.keys().map(String::as_str).collect();
        unknown.sort_unstable();
        Err(RiskException::new(
            format!("unknown para = {}", unknown.join(", ")),
            ErrCode::ParaError,
        ))
    }
}

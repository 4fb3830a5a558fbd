use chrono::NaiveDateTime;
use serde::Serialize;

use super::bands::{risk_bands, RiskBand};
use super::summary::summary_label;
use crate::common::risk_exception::{ErrCode, RiskException};
use crate::math::risk_metric::{AnnotatedPoint, RiskMetric};
use crate::math::risk_table::RiskTable;

/// Everything the chart renderer needs from one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub summary: String,
    pub updated_at: NaiveDateTime,
    #[serde(flatten)]
    pub metric: RiskMetric,
    pub bands: Vec<RiskBand>,
}

impl RiskReport {
    pub fn new(metric: RiskMetric, updated_at: NaiveDateTime) -> Self {
        let last = metric.last();
        Self {
            summary: summary_label(&updated_at, last.value, last.risk),
            updated_at,
            metric,
            bands: risk_bands(),
        }
    }

    pub fn annotated(&self) -> &[AnnotatedPoint] {
        &self.metric.annotated
    }

    pub fn table(&self) -> &RiskTable {
        &self.metric.table
    }

    pub fn last(&self) -> &AnnotatedPoint {
        self.metric.last()
    }

    pub fn to_json(&self) -> Result<String, RiskException> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RiskException::new(format!("cannot serialize report: {}", e), ErrCode::RenderErr))
    }
}

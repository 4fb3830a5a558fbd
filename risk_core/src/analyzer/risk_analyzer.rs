use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::common::risk_exception::RiskException;
use crate::config::risk_config::RiskConfig;
use crate::math::risk_metric::RiskTransform;
use crate::render::report::RiskReport;
use crate::series::price_point::{PricePoint, Tick};
use crate::series::price_series::Series;
use crate::series::reconciler::{reconcile, recent_window};
use crate::traits::price_feed::PriceFeed;

/// Runs reconciliation and the risk transform as one batch
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: RiskConfig,
    transform: RiskTransform,
}

impl Analyzer {
    pub fn new(config: RiskConfig) -> Result<Self, RiskException> {
        let transform = config.transform()?;
        Ok(Self { config, transform })
    }

    /// Pull all three inputs from `feed`, then run.
    ///
    /// The recent feed is only queried when the history stops before `today`.
    pub fn run_feed<F: PriceFeed>(&self, feed: &F, today: NaiveDate) -> Result<RiskReport, F::Error> {
        let historical = feed.historical()?;
        let recent = match recent_window(&historical, today)? {
            Some(window) => {
                debug!(start = %window.start, end = %window.end, "requesting recent feed");
                feed.recent(&window)?
            }
            None => Vec::new(),
        };
        let tick = feed.latest_tick()?;
        Ok(self.run(&historical, &recent, &tick)?)
    }

    pub fn run(&self, historical: &[PricePoint], recent: &[PricePoint], tick: &Tick) -> Result<RiskReport, RiskException> {
        let series = reconcile(historical, recent, &tick.to_point())?;
        self.analyze(&series, tick.observed_at)
    }

    /// Run the transform on an already reconciled series
    pub fn analyze(&self, series: &Series, updated_at: NaiveDateTime) -> Result<RiskReport, RiskException> {
        let metric = self.transform.apply(series)?;
        let report = RiskReport::new(metric, updated_at);
        info!(
            points = series.len(),
            window = self.config.window,
            diminishing_factor = self.config.diminishing_factor,
            "{}",
            report.summary
        );
        Ok(report)
    }
}

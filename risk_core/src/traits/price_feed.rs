use crate::common::risk_exception::RiskException;
use crate::series::price_point::{PricePoint, Tick};
use crate::series::reconciler::RecentWindow;

/// Source of the three inputs the reconciler merges.
///
/// Implementations do their own I/O and retries; errors surface unchanged
/// through `Analyzer::run_feed`.
pub trait PriceFeed {
    type Error: std::error::Error + From<RiskException>;

    /// Long-range daily closes; rows with value <= 0 mean "no data"
    fn historical(&self) -> Result<Vec<PricePoint>, Self::Error>;

    /// Daily prices inside `window`, already mapped to `PricePoint`
    fn recent(&self, window: &RecentWindow) -> Result<Vec<PricePoint>, Self::Error>;

    fn latest_tick(&self) -> Result<Tick, Self::Error>;
}

pub mod analyzer;
pub mod common;
pub mod config;
pub mod math;
pub mod render;
pub mod series;
pub mod traits;

pub use analyzer::risk_analyzer::Analyzer;
pub use common::risk_exception::{ErrCode, RiskException};
pub use config::risk_config::RiskConfig;
pub use render::report::RiskReport;
pub use series::price_point::{PricePoint, Tick};
pub use series::price_series::Series;

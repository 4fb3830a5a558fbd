pub mod moving_average;
pub mod risk_metric;
pub mod risk_table;

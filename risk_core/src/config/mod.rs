pub mod risk_config;

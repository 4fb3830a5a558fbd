pub mod risk_analyzer;

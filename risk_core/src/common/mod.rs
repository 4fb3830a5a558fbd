pub mod enums;
pub mod risk_exception;
pub mod time;
pub mod utils;

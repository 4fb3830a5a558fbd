use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the risk pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Series errors (0-99)
    #[strum(serialize = "_SERIES_ERR_BEGIN")]
    SeriesErrBegin = 0,
    #[strum(serialize = "EMPTY_SERIES")]
    EmptySeries = 1,
    #[strum(serialize = "INVALID_TICK")]
    InvalidTick = 2,
    #[strum(serialize = "INVALID_SERIES")]
    InvalidSeries = 3,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 4,
    #[strum(serialize = "_SERIES_ERR_END")]
    SeriesErrEnd = 99,

    // Transform errors (100-199)
    #[strum(serialize = "_TRANSFORM_ERR_BEGIN")]
    TransformErrBegin = 100,
    #[strum(serialize = "DEGENERATE_RANGE")]
    DegenerateRange = 101,
    #[strum(serialize = "UNDEFINED_INVERSE")]
    UndefinedInverse = 102,
    #[strum(serialize = "_TRANSFORM_ERR_END")]
    TransformErrEnd = 199,

    // Config errors (200-299)
    #[strum(serialize = "_CONFIG_ERR_BEGIN")]
    ConfigErrBegin = 200,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 201,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 202,
    #[strum(serialize = "_CONFIG_ERR_END")]
    ConfigErrEnd = 299,

    // Render errors (300-399)
    #[strum(serialize = "_RENDER_ERR_BEGIN")]
    RenderErrBegin = 300,
    #[strum(serialize = "RENDER_ERR")]
    RenderErr = 301,
    #[strum(serialize = "_RENDER_ERR_END")]
    RenderErrEnd = 399,
}

impl ErrCode {
    pub fn is_series_err(&self) -> bool {
        let code = *self as i32;
        code > Self::SeriesErrBegin as i32 && code < Self::SeriesErrEnd as i32
    }

    pub fn is_transform_err(&self) -> bool {
        let code = *self as i32;
        code > Self::TransformErrBegin as i32 && code < Self::TransformErrEnd as i32
    }

    pub fn is_config_err(&self) -> bool {
        let code = *self as i32;
        code > Self::ConfigErrBegin as i32 && code < Self::ConfigErrEnd as i32
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{errcode}: {msg}")]
pub struct RiskException {
    pub errcode: ErrCode,
    pub msg: String,
}

impl RiskException {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_series_err(&self) -> bool {
        self.errcode.is_series_err()
    }

    pub fn is_transform_err(&self) -> bool {
        self.errcode.is_transform_err()
    }

    pub fn is_config_err(&self) -> bool {
        self.errcode.is_config_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_err_code_ranges() {
        assert!(ErrCode::EmptySeries.is_series_err());
        assert!(ErrCode::InvalidTick.is_series_err());
        assert!(!ErrCode::SeriesErrBegin.is_series_err());
        assert!(ErrCode::DegenerateRange.is_transform_err());
        assert!(ErrCode::UndefinedInverse.is_transform_err());
        assert!(!ErrCode::UndefinedInverse.is_series_err());
        assert!(ErrCode::ParaError.is_config_err());
    }

    #[test]
    fn test_display_and_parse() {
        let err = RiskException::new("all deviations equal", ErrCode::DegenerateRange);
        assert_eq!(err.to_string(), "DEGENERATE_RANGE: all deviations equal");
        assert_eq!(ErrCode::from_str("INVALID_TICK").unwrap(), ErrCode::InvalidTick);
    }
}

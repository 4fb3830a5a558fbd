use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::common::risk_exception::{ErrCode, RiskException};

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp as written by the price feeds.
///
/// Supports "YYYY-MM-DD HH:MM:SS", the same with a "+HH:MM" offset, RFC 3339,
/// "YYYY-MM-DD" and "YYYYMMDD". Date-only inputs map to midnight. Offsets are
/// converted to UTC.
pub fn parse_datetime(time_str: &str) -> Result<NaiveDateTime, RiskException> {
    let s = time_str.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FMT) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    let fmt = if s.contains('-') { DATE_FMT } else { "%Y%m%d" };
    NaiveDate::parse_from_str(s, fmt)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|e| {
            RiskException::new(
                format!("cannot parse time \"{}\": {}", s, e),
                ErrCode::SrcDataFormatError,
            )
        })
}

/// Parse a calendar date, accepting any format `parse_datetime` does
pub fn parse_date(time_str: &str) -> Result<NaiveDate, RiskException> {
    parse_datetime(time_str).map(|dt| dt.date())
}

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(DATETIME_FMT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 14).unwrap();
        assert_eq!(parse_date("2021-03-14").unwrap(), expected);
        assert_eq!(parse_date("20210314").unwrap(), expected);
        assert_eq!(parse_date("2021-03-14 23:10:00").unwrap(), expected);
        assert_eq!(parse_date(" 2021-03-14 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_datetime_with_offset() {
        let dt = parse_datetime("2021-03-14 12:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(&dt), "2021-03-14 10:00:00");

        let dt = parse_datetime("2021-03-14T12:30:00Z").unwrap();
        assert_eq!(format_timestamp(&dt), "2021-03-14 12:30:00");
    }

    #[test]
    fn test_parse_error_code() {
        let err = parse_date("14/03/2021").unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataFormatError);
    }
}

use chrono::NaiveDateTime;

use crate::common::time::format_timestamp;
use crate::common::utils::round_half_even;

/// Chart title: "Updated: <timestamp> | Price: <int> | Risk: <2 decimals>"
pub fn summary_label(updated_at: &NaiveDateTime, last_price: f64, last_risk: f64) -> String {
    format!(
        "Updated: {} | Price: {} | Risk: {:.2}",
        format_timestamp(updated_at),
        round_half_even(last_price, 0) as i64,
        round_half_even(last_risk, 2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_summary_label() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(14, 5, 9).unwrap();
        assert_eq!(
            summary_label(&at, 61234.5, 0.7349),
            "Updated: 2024-03-01 14:05:09 | Price: 61234 | Risk: 0.73"
        );
        assert_eq!(
            summary_label(&at, 61235.5, 0.4),
            "Updated: 2024-03-01 14:05:09 | Price: 61236 | Risk: 0.40"
        );
    }
}

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use risk_core::math::risk_metric::AnnotatedPoint;
use risk_core::math::risk_table::RiskTable;
use risk_core::RiskReport;
use tracing::info;

pub fn write_annotated<W: Write>(w: W, points: &[AnnotatedPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_table<W: Write>(w: W, table: &RiskTable) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    writer.write_record(["risk", "price"])?;
    for entry in table.entries() {
        writer.write_record([entry.risk_level.to_string(), format!("{:.0}", entry.implied_price)])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `annotated.csv`, `risk_table.csv` and `report.json` into `dir`
pub fn write_report(dir: &Path, report: &RiskReport) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join("annotated.csv");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_annotated(file, report.annotated())?;

    let path = dir.join("risk_table.csv");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_table(file, report.table())?;

    let path = dir.join("report.json");
    fs::write(&path, report.to_json()?).with_context(|| format!("writing {}", path.display()))?;

    info!(dir = %dir.display(), "wrote annotated series, risk table and report");
    Ok(())
}

/// Render the risk table for the terminal
pub fn format_table(table: &RiskTable) -> String {
    let mut out = String::from("Risk | Price\n-----+------------\n");
    for entry in table.entries() {
        out.push_str(&format!("{:>4} | {:>10.0}\n", entry.risk_level.to_string(), entry.implied_price));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use risk_core::{Analyzer, PricePoint, RiskConfig, Tick};

    fn sample_report() -> RiskReport {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let historical: Vec<PricePoint> = (0..60)
            .map(|i| {
                let t = i as f64;
                PricePoint::new(start + Duration::days(i), 7000.0 * (0.01 * t + 0.2 * (t / 5.0).sin()).exp())
            })
            .collect();
        let tick = Tick::new((start + Duration::days(60)).and_hms_opt(12, 0, 0).unwrap(), 12_000.0);
        Analyzer::new(RiskConfig::default()).unwrap().run(&historical, &[], &tick).unwrap()
    }

    #[test]
    fn test_write_annotated_header_and_rows() {
        let report = sample_report();
        let mut buf = Vec::new();
        write_annotated(&mut buf, report.annotated()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "age_index,date,value,moving_average,adjusted_deviation,risk,zone"
        );
        assert!(lines.next().unwrap().starts_with("0,2020-01-01,7000.0,7000.0,0.0,"));
        assert_eq!(text.lines().count(), 62);
    }

    #[test]
    fn test_write_table() {
        let report = sample_report();
        let mut buf = Vec::new();
        write_table(&mut buf, report.table()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 11);
        assert_eq!(text.lines().next().unwrap(), "risk,price");
        assert!(text.lines().nth(1).unwrap().starts_with("0.0,"));
        assert!(text.lines().last().unwrap().starts_with("0.9,"));
    }

    #[test]
    fn test_format_table() {
        let report = sample_report();
        let text = format_table(report.table());
        assert_eq!(text.lines().count(), 12);
        assert!(text.lines().nth(2).unwrap().starts_with(" 0.0 |"));
    }
}

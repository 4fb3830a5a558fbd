use chrono::{Duration, NaiveDate};
use risk_core::math::risk_metric::RiskTransform;
use risk_core::series::reconciler::reconcile;
use risk_core::{Analyzer, ErrCode, PricePoint, RiskConfig, Series, Tick};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2012, 1, 1).unwrap() + Duration::days(offset)
}

/// Daily history with a growth trend, a four-year cycle and a few gap rows
fn history(n: usize) -> Vec<PricePoint> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let value = if i % 97 == 13 {
                0.0
            } else {
                5.0 * (0.004 * t + 1.2 * (t / 230.0).sin()).exp()
            };
            PricePoint::new(day(i as i64), value)
        })
        .collect()
}

#[test]
fn reconciler_example() {
    let historical = vec![
        PricePoint::new(day(1), 100.0),
        PricePoint::new(day(2), -1.0),
        PricePoint::new(day(3), 110.0),
    ];
    let recent = vec![PricePoint::new(day(3), 111.0), PricePoint::new(day(4), 120.0)];
    let series = reconcile(&historical, &recent, &PricePoint::new(day(5), 125.0)).unwrap();

    assert_eq!(
        series.points(),
        &[
            PricePoint::new(day(1), 100.0),
            PricePoint::new(day(3), 110.0),
            PricePoint::new(day(4), 120.0),
            PricePoint::new(day(5), 125.0),
        ]
    );
}

#[test]
fn full_run_properties() {
    let historical = history(1500);
    let recent: Vec<PricePoint> = (1500..1530)
        .map(|i| PricePoint::new(day(i), 5.0 * (0.004 * i as f64).exp()))
        .collect();
    let tick = Tick::new(day(1530).and_hms_opt(16, 45, 0).unwrap(), 2100.0);

    let analyzer = Analyzer::new(RiskConfig::default()).unwrap();
    let report = analyzer.run(&historical, &recent, &tick).unwrap();
    let annotated = report.annotated();

    let gaps = historical.iter().filter(|p| p.value <= 0.0).count();
    assert_eq!(annotated.len(), 1500 - gaps + 30 + 1);

    assert_eq!(annotated[0].adjusted_deviation, 0.0);
    assert_eq!(annotated[0].moving_average, annotated[0].value);
    assert!(annotated.iter().all(|p| (0.0..=1.0).contains(&p.risk)));
    assert_eq!(annotated.iter().filter(|p| p.risk == 0.0).count(), 1);
    assert_eq!(annotated.iter().filter(|p| p.risk == 1.0).count(), 1);

    for entry in report.table().entries() {
        let risk = report.metric.risk_at_price(entry.implied_price).unwrap();
        assert!((risk - entry.risk_level.as_f64()).abs() < 5e-3);
    }

    let again = analyzer.run(&historical, &recent, &tick).unwrap();
    assert_eq!(report, again);

    assert!(report.summary.starts_with("Updated: 2016-03-10 16:45:00 | Price: 2100 | Risk: "));
    let json = report.to_json().unwrap();
    assert!(json.contains("\"annotated\""));
    assert!(json.contains("\"table\""));
    assert!(json.contains("\"bands\""));
}

#[test]
fn tick_on_last_day_kept_as_extra_row() {
    let historical = history(400);
    let last = *historical.last().unwrap();
    let tick = Tick::new(last.date.and_hms_opt(23, 0, 0).unwrap(), last.value * 1.01);

    let report = Analyzer::new(RiskConfig::default()).unwrap().run(&historical, &[], &tick).unwrap();
    let n = report.annotated().len();
    assert_eq!(report.annotated()[n - 1].date, report.annotated()[n - 2].date);
    assert_eq!(report.annotated()[n - 1].value, last.value * 1.01);
}

#[test]
fn tick_before_recent_rows_still_scored_last() {
    let historical = history(400);
    let recent: Vec<PricePoint> = (400..403).map(|i| PricePoint::new(day(i), 60.0)).collect();
    let tick = Tick::new(day(399).and_hms_opt(8, 0, 0).unwrap(), 58.0);

    let report = Analyzer::new(RiskConfig::default()).unwrap().run(&historical, &recent, &tick).unwrap();
    let n = report.annotated().len();
    assert_eq!(report.annotated()[n - 1].date, day(402));
    assert_eq!(report.annotated()[n - 1].value, 58.0);
    assert_eq!(report.annotated()[n - 2].value, 60.0);
}

#[test]
fn constant_price_is_degenerate() {
    let historical: Vec<PricePoint> = (0..30).map(|i| PricePoint::new(day(i), 16_000.0)).collect();
    let tick = Tick::new(day(30).and_hms_opt(0, 0, 0).unwrap(), 16_000.0);
    let err = Analyzer::new(RiskConfig::default()).unwrap().run(&historical, &[], &tick).unwrap_err();
    assert_eq!(err.errcode, ErrCode::DegenerateRange);
    assert!(err.is_transform_err());
}

#[test]
fn single_point_has_no_inverse() {
    let series = Series::new(vec![PricePoint::new(day(0), 16_000.0)]).unwrap();
    let err = RiskTransform::default().apply(&series).unwrap_err();
    assert_eq!(err.errcode, ErrCode::UndefinedInverse);
}

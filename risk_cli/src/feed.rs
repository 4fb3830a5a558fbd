//! CSV-backed price feeds.
//!
//! - historical: `Date,Value`, one row per day, value <= 0 or empty for missing days
//! - recent: OHLC export with a `Date` column; one price column is picked
//! - tick: `Time,Price`, the last row wins

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use risk_core::common::time::{parse_date, parse_datetime};
use risk_core::series::reconciler::RecentWindow;
use risk_core::traits::price_feed::PriceFeed;
use risk_core::{PricePoint, RiskException, Tick};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("File I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line} in {path}: {source}")]
    CsvParse {
        path: String,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Column {column} not found in {path}")]
    MissingColumn { path: String, column: String },

    #[error("Bad record at line {line} in {path}: {source}")]
    Record {
        path: String,
        line: u64,
        #[source]
        source: RiskException,
    },

    #[error("No tick rows in {path}")]
    EmptyTick { path: String },

    #[error(transparent)]
    Risk(#[from] RiskException),
}

#[derive(Debug, Deserialize)]
struct HistoricalRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Value")]
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TickRecord {
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Price")]
    price: f64,
}

fn line_of(position: Option<&csv::Position>) -> u64 {
    position.map(|p| p.line()).unwrap_or(0)
}

fn csv_error(source: &str, err: csv::Error) -> FeedError {
    FeedError::CsvParse {
        path: source.to_string(),
        line: line_of(err.position()),
        source: err,
    }
}

fn open(path: &Path) -> Result<File, FeedError> {
    File::open(path).map_err(|source| FeedError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read the long-history feed. Placeholder rows are kept for the reconciler.
pub fn read_historical<R: Read>(rdr: R, source: &str) -> Result<Vec<PricePoint>, FeedError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = reader.headers().map_err(|e| csv_error(source, e))?.clone();
    let mut points = Vec::new();

    for result in reader.records() {
        let raw = result.map_err(|e| csv_error(source, e))?;
        let line = line_of(raw.position());
        let record: HistoricalRecord = raw.deserialize(Some(&headers)).map_err(|e| csv_error(source, e))?;
        let date = parse_date(&record.date).map_err(|e| FeedError::Record {
            path: source.to_string(),
            line,
            source: e,
        })?;
        points.push(PricePoint::new(date, record.value.unwrap_or(0.0)));
    }

    debug!(source, rows = points.len(), "read historical feed");
    Ok(points)
}

/// Read the recent feed, taking prices from `column` and keeping rows inside `window`
pub fn read_recent<R: Read>(
    rdr: R,
    source: &str,
    column: &str,
    window: &RecentWindow,
) -> Result<Vec<PricePoint>, FeedError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = reader.headers().map_err(|e| csv_error(source, e))?.clone();

    let find = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| FeedError::MissingColumn {
            path: source.to_string(),
            column: name.to_string(),
        })
    };
    let date_idx = find("Date")?;
    let value_idx = find(column)?;

    let mut points = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(source, e))?;
        let line = line_of(record.position());
        let bad = |e: RiskException| FeedError::Record {
            path: source.to_string(),
            line,
            source: e,
        };

        let date = parse_date(record.get(date_idx).unwrap_or_default()).map_err(bad)?;
        if !window.contains(date) {
            continue;
        }
        let raw = record.get(value_idx).unwrap_or_default();
        let value: f64 = raw.parse().map_err(|e| {
            bad(RiskException::new(
                format!("{} value \"{}\": {}", column, raw, e),
                risk_core::ErrCode::SrcDataFormatError,
            ))
        })?;
        points.push(PricePoint::new(date, value));
    }

    debug!(source, column, rows = points.len(), start = %window.start, end = %window.end, "read recent feed");
    Ok(points)
}

/// Read the tick file; the last row is the latest trade
pub fn read_tick<R: Read>(rdr: R, source: &str) -> Result<Tick, FeedError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = reader.headers().map_err(|e| csv_error(source, e))?.clone();
    let mut last = None;

    for result in reader.records() {
        let raw = result.map_err(|e| csv_error(source, e))?;
        let line = line_of(raw.position());
        let record: TickRecord = raw.deserialize(Some(&headers)).map_err(|e| csv_error(source, e))?;
        let observed_at = parse_datetime(&record.time).map_err(|e| FeedError::Record {
            path: source.to_string(),
            line,
            source: e,
        })?;
        last = Some(Tick::new(observed_at, record.price));
    }

    last.ok_or_else(|| FeedError::EmptyTick {
        path: source.to_string(),
    })
}

#[derive(Debug, Clone)]
pub enum TickSource {
    Fixed(Tick),
    File(PathBuf),
}

/// Feed reading the three inputs from local files
#[derive(Debug, Clone)]
pub struct CsvFeed {
    pub historical: PathBuf,
    pub recent: PathBuf,
    pub recent_column: String,
    pub tick: TickSource,
}

impl PriceFeed for CsvFeed {
    type Error = FeedError;

    fn historical(&self) -> Result<Vec<PricePoint>, FeedError> {
        info!(path = %self.historical.display(), "loading historical feed");
        read_historical(open(&self.historical)?, &self.historical.display().to_string())
    }

    fn recent(&self, window: &RecentWindow) -> Result<Vec<PricePoint>, FeedError> {
        info!(path = %self.recent.display(), column = %self.recent_column, "loading recent feed");
        read_recent(
            open(&self.recent)?,
            &self.recent.display().to_string(),
            &self.recent_column,
            window,
        )
    }

    fn latest_tick(&self) -> Result<Tick, FeedError> {
        match &self.tick {
            TickSource::Fixed(tick) => Ok(*tick),
            TickSource::File(path) => read_tick(open(path)?, &path.display().to_string()),
        }
    }
}

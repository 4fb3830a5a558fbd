mod feed;
mod output;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use risk_core::common::time::{parse_date, parse_datetime};
use risk_core::{Analyzer, RiskConfig, Tick};
use tracing::info;

use feed::{CsvFeed, TickSource};

/// Bitcoin risk metric from a long-history feed, a recent feed and the latest tick
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Long-history daily CSV (Date,Value); values <= 0 mark missing days
    #[arg(long)]
    historical: PathBuf,

    /// Recent daily OHLC CSV covering the days after the history ends
    #[arg(long)]
    recent: PathBuf,

    /// Column of the recent CSV used as the daily price
    #[arg(long, default_value = "Open")]
    recent_column: String,

    /// Latest traded price
    #[arg(long, conflicts_with = "tick_file", required_unless_present = "tick_file")]
    tick_price: Option<f64>,

    /// Time of the latest trade (defaults to now, UTC)
    #[arg(long, requires = "tick_price")]
    tick_time: Option<String>,

    /// CSV with Time,Price rows; the last row is the latest tick
    #[arg(long)]
    tick_file: Option<PathBuf>,

    /// JSON object with risk parameters (window, diminishing_factor)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Moving average window in rows, overrides the config file
    #[arg(long)]
    window: Option<usize>,

    /// Diminishing-returns exponent, overrides the config file
    #[arg(long)]
    diminishing_factor: Option<f64>,

    /// Last day requested from the recent feed (defaults to today, UTC)
    #[arg(long)]
    today: Option<String>,

    /// Directory for annotated.csv, risk_table.csv and report.json
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<RiskConfig> {
    let mut conf: HashMap<String, serde_json::Value> = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => HashMap::new(),
    };

    if let Some(window) = args.window {
        conf.insert("window".to_string(), window.into());
    }
    if let Some(factor) = args.diminishing_factor {
        conf.insert("diminishing_factor".to_string(), factor.into());
    }

    Ok(RiskConfig::new(Some(conf))?)
}

fn tick_source(args: &Args) -> Result<TickSource> {
    if let Some(path) = &args.tick_file {
        return Ok(TickSource::File(path.clone()));
    }
    let price = args.tick_price.context("either --tick-price or --tick-file is required")?;
    let observed_at = match &args.tick_time {
        Some(time) => parse_datetime(time)?,
        None => Utc::now().naive_utc(),
    };
    Ok(TickSource::Fixed(Tick::new(observed_at, price)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("risk_cli=info,risk_core=info")),
        )
        .init();

    let args = Args::parse();

    let config = load_config(&args)?;
    let today: NaiveDate = match &args.today {
        Some(day) => parse_date(day)?,
        None => Utc::now().date_naive(),
    };
    info!(window = config.window, diminishing_factor = config.diminishing_factor, %today, "starting run");

    let feed = CsvFeed {
        historical: args.historical.clone(),
        recent: args.recent.clone(),
        recent_column: args.recent_column.clone(),
        tick: tick_source(&args)?,
    };

    let analyzer = Analyzer::new(config)?;
    let report = analyzer.run_feed(&feed, today)?;

    println!("{}", report.summary);
    println!();
    print!("{}", output::format_table(report.table()));

    if let Some(dir) = &args.output_dir {
        output::write_report(dir, &report)?;
    }

    Ok(())
}

//! CLI definition and dispatch.

use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::analysis::{analyze, AnalysisConfig};
use crate::domain::error::TickerlensError;
use crate::domain::indicator_engine::compute_indicators;
use crate::domain::price::PriceSeries;
use crate::domain::risk::RiskConfig;
use crate::domain::window::{trim_bars, trim_indicators};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "tickerlens", about = "Equity risk and indicator analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare a ticker against the benchmark
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        ticker: String,
        /// Override the configured benchmark ticker
        #[arg(short, long)]
        benchmark: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute the standard indicator set for a ticker
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        ticker: String,
    },
    /// List tickers available in the data directory
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            config,
            ticker,
            benchmark,
            output,
        } => run_analyze(&config, &ticker, benchmark.as_deref(), output.as_deref()),
        Command::Indicators { config, ticker } => run_indicators(&config, &ticker),
        Command::ListTickers { config } => run_list_tickers(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

/// Settings resolved from the INI file.
pub struct Settings {
    pub data_path: PathBuf,
    pub benchmark: String,
    pub benchmark_label: String,
    pub risk: RiskConfig,
    pub lookback: Duration,
    pub buffer: Duration,
}

pub fn load_settings(path: &std::path::Path) -> Result<Settings, TickerlensError> {
    let config =
        FileConfigAdapter::from_file(path).map_err(|e| TickerlensError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let data_path = config
        .get_string("data", "path")
        .ok_or_else(|| TickerlensError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;

    let lookback_years = config.get_int("analysis", "lookback_years", 3);
    if lookback_years <= 0 {
        return Err(TickerlensError::ConfigInvalid {
            section: "analysis".into(),
            key: "lookback_years".into(),
            reason: "must be positive".into(),
        });
    }
    let buffer_days = config.get_int("analysis", "buffer_days", 50);
    if buffer_days < 0 {
        return Err(TickerlensError::ConfigInvalid {
            section: "analysis".into(),
            key: "buffer_days".into(),
            reason: "must not be negative".into(),
        });
    }

    Ok(Settings {
        data_path: PathBuf::from(data_path),
        benchmark: config
            .get_string("analysis", "benchmark")
            .unwrap_or_else(|| "^GSPC".to_string()),
        benchmark_label: config
            .get_string("analysis", "benchmark_label")
            .unwrap_or_else(|| "S&P 500".to_string()),
        risk: RiskConfig {
            risk_free_rate: config.get_double("analysis", "risk_free_rate", 0.03),
            trading_days_per_year: 252.0,
        },
        lookback: Duration::days(lookback_years * 365),
        buffer: Duration::days(buffer_days),
    })
}

fn fetch_non_empty(
    adapter: &CsvDataAdapter,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, TickerlensError> {
    let series = adapter.fetch_history(ticker, start, end)?;
    if series.is_empty() {
        return Err(TickerlensError::EmptySeries {
            ticker: ticker.to_string(),
        });
    }
    Ok(series)
}

fn run_analyze(
    config_path: &std::path::Path,
    ticker: &str,
    benchmark_override: Option<&str>,
    output: Option<&std::path::Path>,
) -> Result<(), TickerlensError> {
    let settings = load_settings(config_path)?;
    let benchmark_ticker = benchmark_override.unwrap_or(&settings.benchmark);
    let adapter = CsvDataAdapter::new(settings.data_path.clone());

    let end = Utc::now().date_naive();
    let start = end - settings.lookback - settings.buffer;

    let subject = fetch_non_empty(&adapter, ticker, start, end)?;
    let benchmark = fetch_non_empty(&adapter, benchmark_ticker, start, end)?;
    let company_name = adapter.fetch_company_name(ticker)?;

    let analysis_config = AnalysisConfig {
        risk: settings.risk,
        benchmark_label: settings.benchmark_label,
        ..AnalysisConfig::default()
    };
    let report = analyze(&subject, &benchmark, company_name, &analysis_config)?;

    match output {
        Some(path) => {
            TextReportAdapter.write(&report, &path.display().to_string())?;
            println!("report written to {}", path.display());
        }
        None => print!("{}", TextReportAdapter::render(&report)),
    }
    Ok(())
}

fn run_indicators(config_path: &std::path::Path, ticker: &str) -> Result<(), TickerlensError> {
    let settings = load_settings(config_path)?;
    let adapter = CsvDataAdapter::new(settings.data_path.clone());

    let end = Utc::now().date_naive();
    let start = end - settings.lookback - settings.buffer;

    // Fetch with buffer so rolling windows are seeded before the publish
    // window starts, then cut the buffer away.
    let buffered = fetch_non_empty(&adapter, ticker, start, end)?;
    let indicators = compute_indicators(&buffered)?;
    let published = trim_bars(&buffered, settings.lookback, end);

    println!(
        "{}: {} bars published ({} fetched)",
        ticker,
        published.len(),
        buffered.len()
    );

    let mut trimmed: Vec<_> = indicators
        .values()
        .map(|s| trim_indicators(s, settings.lookback, end))
        .collect();
    trimmed.sort_by_key(|s| s.indicator_type.to_string());

    for series in &trimmed {
        let latest = series.values.iter().rev().find(|p| p.valid);
        match latest {
            Some(point) => println!(
                "  {:<18} {} = {}",
                series.indicator_type.to_string(),
                point.date,
                describe_value(&point.value)
            ),
            None => println!(
                "  {:<18} not enough data",
                series.indicator_type.to_string()
            ),
        }
    }
    Ok(())
}

fn describe_value(value: &crate::domain::indicator::IndicatorValue) -> String {
    use crate::domain::indicator::IndicatorValue;
    match value {
        IndicatorValue::Simple(v) => format!("{:.4}", v),
        IndicatorValue::Macd {
            line,
            signal,
            histogram,
        } => format!(
            "line {:.4}, signal {:.4}, histogram {:.4}",
            line, signal, histogram
        ),
        IndicatorValue::Bollinger {
            upper,
            middle,
            lower,
        } => format!("upper {:.4}, middle {:.4}, lower {:.4}", upper, middle, lower),
    }
}

fn run_list_tickers(config_path: &std::path::Path) -> Result<(), TickerlensError> {
    let settings = load_settings(config_path)?;
    let adapter = CsvDataAdapter::new(settings.data_path);

    for ticker in adapter.list_tickers()? {
        println!("{ticker}");
    }
    Ok(())
}

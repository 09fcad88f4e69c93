//! Full comparative analysis of one ticker against a benchmark.
//!
//! Bundles the risk model, the recent-performance comparison, and the
//! last-days display table into one report value for the presentation layer.
//! The computation is pure: all data arrives as arguments.

use std::collections::BTreeMap;

use crate::domain::error::TickerlensError;
use crate::domain::performance::{compare_recent_performance, RecentPerformance};
use crate::domain::price::{PriceBar, PriceSeries};
use crate::domain::returns::{ReturnSeries, ReturnUnit};
use crate::domain::risk::{MetricResult, RiskConfig, RiskMetric, RiskMetrics};

pub const LAST_DAYS_SHOWN: usize = 5;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub risk: RiskConfig,
    /// Display name for the benchmark in the comparison sentence.
    pub benchmark_label: String,
    pub comparison_lookback_bars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            risk: RiskConfig::default(),
            benchmark_label: "S&P 500".into(),
            comparison_lookback_bars: 30,
        }
    }
}

/// One row of the last-days table: the bar plus its percent return
/// (undefined for a zero prior close).
#[derive(Debug, Clone)]
pub struct DailyRow {
    pub bar: PriceBar,
    pub return_pct: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub ticker: String,
    pub company_name: Option<String>,
    pub benchmark_ticker: String,
    pub subject_metrics: BTreeMap<RiskMetric, MetricResult>,
    /// Benchmark measured against itself; the beta=1/alpha=0/R2=1 baseline.
    pub benchmark_metrics: BTreeMap<RiskMetric, MetricResult>,
    pub recent: RecentPerformance,
    pub comparison: String,
    pub last_days: Vec<DailyRow>,
}

/// Run the whole pipeline: fraction returns for both series, risk metrics
/// for subject-vs-benchmark and benchmark-vs-itself, trailing comparison,
/// and the display table.
pub fn analyze(
    subject: &PriceSeries,
    benchmark: &PriceSeries,
    company_name: Option<String>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, TickerlensError> {
    if subject.is_empty() {
        return Err(TickerlensError::EmptySeries {
            ticker: subject.ticker().to_string(),
        });
    }
    if benchmark.is_empty() {
        return Err(TickerlensError::EmptySeries {
            ticker: benchmark.ticker().to_string(),
        });
    }

    let subject_returns = ReturnSeries::from_prices(subject, ReturnUnit::Fraction)?;
    let benchmark_returns = ReturnSeries::from_prices(benchmark, ReturnUnit::Fraction)?;

    let subject_metrics =
        RiskMetrics::compute(&subject_returns, &benchmark_returns, &config.risk)?.explain();
    let benchmark_metrics =
        RiskMetrics::compute(&benchmark_returns, &benchmark_returns, &config.risk)?.explain();

    let recent =
        compare_recent_performance(subject, benchmark, config.comparison_lookback_bars)?;
    let comparison = recent.summary(&config.benchmark_label, config.comparison_lookback_bars);

    let display_returns = ReturnSeries::from_prices(subject, ReturnUnit::Percent)?;
    let last_days = last_days_table(subject, &display_returns, LAST_DAYS_SHOWN);

    Ok(AnalysisReport {
        ticker: subject.ticker().to_string(),
        company_name,
        benchmark_ticker: benchmark.ticker().to_string(),
        subject_metrics,
        benchmark_metrics,
        recent,
        comparison,
        last_days,
    })
}

fn last_days_table(
    series: &PriceSeries,
    returns: &ReturnSeries,
    days: usize,
) -> Vec<DailyRow> {
    series
        .tail(days)
        .iter()
        .map(|bar| {
            let return_pct = returns
                .points()
                .iter()
                .find(|p| p.date == bar.date)
                .and_then(|p| p.value);
            DailyRow {
                bar: bar.clone(),
                return_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::MetricTag;
    use chrono::NaiveDate;

    fn make_series(ticker: &str, closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000 + i as i64,
            })
            .collect();
        PriceSeries::new(ticker.into(), bars).unwrap()
    }

    fn wavy_closes(n: usize, base: f64) -> Vec<f64> {
        (0..n).map(|i| base + ((i * 13) % 23) as f64).collect()
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            comparison_lookback_bars: 10,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn analyze_full_report() {
        let subject = make_series("AAPL", &wavy_closes(60, 150.0));
        let benchmark = make_series("^GSPC", &wavy_closes(60, 4000.0));

        let report = analyze(&subject, &benchmark, Some("Apple Inc.".into()), &config()).unwrap();

        assert_eq!(report.ticker, "AAPL");
        assert_eq!(report.benchmark_ticker, "^GSPC");
        assert_eq!(report.company_name.as_deref(), Some("Apple Inc."));
        assert_eq!(report.subject_metrics.len(), 5);
        assert_eq!(report.benchmark_metrics.len(), 5);
        assert_eq!(report.last_days.len(), LAST_DAYS_SHOWN);
    }

    #[test]
    fn benchmark_self_metrics_are_baseline() {
        let subject = make_series("AAPL", &wavy_closes(60, 150.0));
        let benchmark = make_series("^GSPC", &wavy_closes(60, 4000.0));

        let report = analyze(&subject, &benchmark, None, &config()).unwrap();

        let beta = &report.benchmark_metrics[&RiskMetric::Beta];
        assert!((beta.value - 1.0).abs() < 1e-9);
        assert_eq!(beta.tag, MetricTag::Favorable);

        let alpha = &report.benchmark_metrics[&RiskMetric::Alpha];
        assert!(alpha.value.abs() < 1e-9);

        let r_squared = &report.benchmark_metrics[&RiskMetric::RSquared];
        assert!((r_squared.value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn last_days_rows_carry_percent_returns() {
        let subject = make_series("AAPL", &wavy_closes(60, 150.0));
        let benchmark = make_series("^GSPC", &wavy_closes(60, 4000.0));

        let report = analyze(&subject, &benchmark, None, &config()).unwrap();

        for row in &report.last_days {
            // Every shown bar has a prior close in a 60-bar series.
            assert!(row.return_pct.is_some());
        }
        let dates: Vec<_> = report.last_days.iter().map(|r| r.bar.date).collect();
        let expected: Vec<_> = subject.tail(5).iter().map(|b| b.date).collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn analyze_rejects_empty_subject() {
        let subject = PriceSeries::new("XYZ".into(), vec![]).unwrap();
        let benchmark = make_series("^GSPC", &wavy_closes(60, 4000.0));

        let result = analyze(&subject, &benchmark, None, &config());
        assert!(matches!(result, Err(TickerlensError::EmptySeries { .. })));
    }

    #[test]
    fn comparison_sentence_names_the_benchmark_label() {
        let subject = make_series("AAPL", &wavy_closes(60, 150.0));
        let benchmark = make_series("^GSPC", &wavy_closes(60, 4000.0));

        let report = analyze(&subject, &benchmark, None, &config()).unwrap();
        assert!(report.comparison.contains("S&P 500"));
        assert!(report.comparison.contains("over the last 10 days"));
    }
}

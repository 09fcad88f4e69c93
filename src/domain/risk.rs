//! Comparative risk model: beta, alpha, R-squared, volatility, Sharpe.
//!
//! All inputs are fraction-scaled daily returns so that alpha and Sharpe sit
//! on the same scale as the risk-free rate (a fraction, e.g. 0.03). The same
//! computation serves both ticker-vs-benchmark and benchmark-vs-itself; the
//! self comparison is the sanity baseline (beta 1, alpha 0, R-squared 1).

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::TickerlensError;
use crate::domain::returns::{align, AlignedReturns, ReturnSeries, ReturnUnit};

/// Per-call assumptions for the risk model. No process-wide defaults.
#[derive(Debug, Clone, Copy)]
pub struct RiskConfig {
    /// Annual risk-free rate as a fraction, e.g. 0.03.
    pub risk_free_rate: f64,
    /// Trading days used for annualization, normally 252.
    pub trading_days_per_year: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.03,
            trading_days_per_year: 252.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskMetric {
    Alpha,
    Beta,
    RSquared,
    StdDev,
    SharpeRatio,
}

impl fmt::Display for RiskMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskMetric::Alpha => write!(f, "Alpha"),
            RiskMetric::Beta => write!(f, "Beta"),
            RiskMetric::RSquared => write!(f, "R-Squared"),
            RiskMetric::StdDev => write!(f, "Standard Deviation"),
            RiskMetric::SharpeRatio => write!(f, "Sharpe Ratio"),
        }
    }
}

/// Directional read on a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricTag {
    Favorable,
    Unfavorable,
}

/// One computed metric with its human-readable reading. Immutable.
#[derive(Debug, Clone)]
pub struct MetricResult {
    pub metric: RiskMetric,
    /// Rounded to 4 decimal places.
    pub value: f64,
    pub interpretation: String,
    pub tag: MetricTag,
}

/// Raw (unrounded) risk metrics for one subject against one benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskMetrics {
    pub beta: f64,
    pub alpha: f64,
    pub r_squared: f64,
    pub std_dev: f64,
    pub sharpe_ratio: f64,
}

impl RiskMetrics {
    /// Compute the full metric suite from two fraction-scaled return series.
    pub fn compute(
        subject: &ReturnSeries,
        benchmark: &ReturnSeries,
        config: &RiskConfig,
    ) -> Result<Self, TickerlensError> {
        if subject.unit() != ReturnUnit::Fraction {
            return Err(TickerlensError::UnitMismatch {
                expected: ReturnUnit::Fraction,
                found: subject.unit(),
            });
        }

        let aligned = align(subject, benchmark)?;
        if aligned.len() < 2 {
            return Err(TickerlensError::InsufficientHistory {
                ticker: aligned.subject_ticker.clone(),
                bars: aligned.len(),
                minimum: 2,
            });
        }

        let (subject_returns, benchmark_returns) = defined_values(&aligned)?;
        Self::from_aligned_values(
            &subject_returns,
            &benchmark_returns,
            &aligned.subject_ticker,
            &aligned.benchmark_ticker,
            config,
        )
    }

    fn from_aligned_values(
        subject: &[f64],
        benchmark: &[f64],
        subject_ticker: &str,
        benchmark_ticker: &str,
        config: &RiskConfig,
    ) -> Result<Self, TickerlensError> {
        let n = subject.len() as f64;
        let subject_mean = mean(subject);
        let benchmark_mean = mean(benchmark);

        let covariance = subject
            .iter()
            .zip(benchmark)
            .map(|(s, b)| (s - subject_mean) * (b - benchmark_mean))
            .sum::<f64>()
            / n;
        let variance = benchmark
            .iter()
            .map(|b| (b - benchmark_mean).powi(2))
            .sum::<f64>()
            / n;

        if variance == 0.0 {
            return Err(TickerlensError::DegenerateVariance {
                ticker: benchmark_ticker.to_string(),
            });
        }
        let beta = covariance / variance;

        let rf = config.risk_free_rate;
        let avg_subject_return = subject_mean * config.trading_days_per_year;
        let avg_benchmark_return = benchmark_mean * config.trading_days_per_year;
        let alpha = avg_subject_return - (rf + beta * (avg_benchmark_return - rf));

        // Sample stddev for the annualized volatility, population moments
        // everywhere else.
        let sample_variance = subject
            .iter()
            .map(|s| (s - subject_mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);
        let std_dev = sample_variance.sqrt() * config.trading_days_per_year.sqrt();

        if std_dev == 0.0 {
            return Err(TickerlensError::DegenerateVariance {
                ticker: subject_ticker.to_string(),
            });
        }
        let sharpe_ratio = (avg_subject_return - rf) / std_dev;

        let subject_pop_std = (subject
            .iter()
            .map(|s| (s - subject_mean).powi(2))
            .sum::<f64>()
            / n)
            .sqrt();
        let correlation = covariance / (subject_pop_std * variance.sqrt());
        let r_squared = correlation * correlation;

        Ok(Self {
            beta,
            alpha,
            r_squared,
            std_dev,
            sharpe_ratio,
        })
    }

    /// Rounded values with interpretation text and a favorable/unfavorable tag.
    pub fn explain(&self) -> BTreeMap<RiskMetric, MetricResult> {
        let mut results = BTreeMap::new();

        let alpha = round4(self.alpha);
        results.insert(
            RiskMetric::Alpha,
            MetricResult {
                metric: RiskMetric::Alpha,
                value: alpha,
                interpretation: format!(
                    "{} alpha indicates {} relative to the benchmark.",
                    if self.alpha > 0.0 { "Positive" } else { "Negative" },
                    if self.alpha > 0.0 {
                        "outperformance"
                    } else {
                        "underperformance"
                    }
                ),
                tag: tag_if(self.alpha > 0.0),
            },
        );

        let beta = round4(self.beta);
        results.insert(
            RiskMetric::Beta,
            MetricResult {
                metric: RiskMetric::Beta,
                value: beta,
                interpretation: format!(
                    "A beta of {} suggests that the stock is {} volatile than the benchmark.",
                    beta,
                    if self.beta > 1.0 { "more" } else { "less" }
                ),
                tag: tag_if(self.beta <= 1.0),
            },
        );

        let r_squared = round4(self.r_squared);
        let r_squared_pct = (self.r_squared * 100.0 * 100.0).round() / 100.0;
        results.insert(
            RiskMetric::RSquared,
            MetricResult {
                metric: RiskMetric::RSquared,
                value: r_squared,
                interpretation: format!(
                    "An R-squared of {}% indicates the percentage of the stock's movement explained by the benchmark.",
                    r_squared_pct
                ),
                tag: tag_if(self.r_squared > 0.7),
            },
        );

        let std_dev = round4(self.std_dev);
        results.insert(
            RiskMetric::StdDev,
            MetricResult {
                metric: RiskMetric::StdDev,
                value: std_dev,
                interpretation: format!(
                    "A higher standard deviation ({}) implies greater volatility in the stock's returns.",
                    std_dev
                ),
                // Polarity inverted: lower volatility is the favorable side.
                tag: tag_if(self.std_dev <= 0.2),
            },
        );

        let sharpe = round4(self.sharpe_ratio);
        results.insert(
            RiskMetric::SharpeRatio,
            MetricResult {
                metric: RiskMetric::SharpeRatio,
                value: sharpe,
                interpretation: format!(
                    "A Sharpe Ratio of {} {}.",
                    sharpe,
                    if self.sharpe_ratio > 1.0 {
                        "indicates good risk-adjusted return"
                    } else {
                        "suggests lower risk-adjusted return"
                    }
                ),
                tag: tag_if(self.sharpe_ratio > 1.0),
            },
        );

        results
    }
}

/// Unwrap aligned values, failing on the first undefined return.
fn defined_values(aligned: &AlignedReturns) -> Result<(Vec<f64>, Vec<f64>), TickerlensError> {
    let mut subject = Vec::with_capacity(aligned.len());
    let mut benchmark = Vec::with_capacity(aligned.len());

    for i in 0..aligned.len() {
        match (aligned.subject[i], aligned.benchmark[i]) {
            (Some(s), Some(b)) => {
                subject.push(s);
                benchmark.push(b);
            }
            (None, _) => {
                return Err(TickerlensError::UndefinedReturn {
                    ticker: aligned.subject_ticker.clone(),
                    date: aligned.dates[i],
                });
            }
            (_, None) => {
                return Err(TickerlensError::UndefinedReturn {
                    ticker: aligned.benchmark_ticker.clone(),
                    date: aligned.dates[i],
                });
            }
        }
    }

    Ok((subject, benchmark))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn tag_if(favorable: bool) -> MetricTag {
    if favorable {
        MetricTag::Favorable
    } else {
        MetricTag::Unfavorable
    }
}

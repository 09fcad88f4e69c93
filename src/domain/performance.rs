//! Recent-performance comparison against the benchmark.

use crate::domain::error::TickerlensError;
use crate::domain::price::PriceSeries;

pub const DEFAULT_LOOKBACK_BARS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct RecentPerformance {
    pub subject_return_pct: f64,
    pub benchmark_return_pct: f64,
    /// Subject minus benchmark, rounded to 2 decimals.
    pub difference_pct: f64,
    pub outperformed: bool,
}

impl RecentPerformance {
    /// "Outperformed the S&P 500 by 1.23% over the last 30 days."
    pub fn summary(&self, benchmark_label: &str, lookback_bars: usize) -> String {
        format!(
            "{} the {} by {}% over the last {} days.",
            if self.outperformed {
                "Outperformed"
            } else {
                "Underperformed"
            },
            benchmark_label,
            self.difference_pct.abs(),
            lookback_bars
        )
    }
}

/// Percentage change over the trailing `lookback_bars` bars for each series
/// (last close vs the close `lookback_bars` bars earlier), and their
/// difference. Either series shorter than the window is an error.
pub fn compare_recent_performance(
    subject: &PriceSeries,
    benchmark: &PriceSeries,
    lookback_bars: usize,
) -> Result<RecentPerformance, TickerlensError> {
    let subject_return_pct = trailing_return_pct(subject, lookback_bars)?;
    let benchmark_return_pct = trailing_return_pct(benchmark, lookback_bars)?;

    let difference_pct =
        ((subject_return_pct - benchmark_return_pct) * 100.0).round() / 100.0;

    Ok(RecentPerformance {
        subject_return_pct,
        benchmark_return_pct,
        difference_pct,
        outperformed: difference_pct > 0.0,
    })
}

fn trailing_return_pct(
    series: &PriceSeries,
    lookback_bars: usize,
) -> Result<f64, TickerlensError> {
    let bars = series.bars();
    if lookback_bars == 0 || bars.len() < lookback_bars {
        return Err(TickerlensError::InsufficientHistory {
            ticker: series.ticker().to_string(),
            bars: bars.len(),
            minimum: lookback_bars,
        });
    }

    let base = bars[bars.len() - lookback_bars].close;
    let last = bars[bars.len() - 1].close;
    if base == 0.0 || !base.is_finite() {
        return Err(TickerlensError::UndefinedReturn {
            ticker: series.ticker().to_string(),
            date: bars[bars.len() - lookback_bars].date,
        });
    }

    Ok((last - base) / base * 100.0)
}

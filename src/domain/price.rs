//! Daily price bar and validated price series.

use chrono::NaiveDate;

use crate::domain::error::TickerlensError;

/// One daily OHLCV bar.
#[derive(Debug, Clone)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl PriceBar {
    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Date-ordered price history for a single instrument.
///
/// The constructor enforces strictly increasing dates: one bar per trading
/// day, no duplicates. Non-trading days are simply absent; no gaps are
/// synthesized.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: String, bars: Vec<PriceBar>) -> Result<Self, TickerlensError> {
        for window in bars.windows(2) {
            if window[1].date <= window[0].date {
                return Err(TickerlensError::UnorderedSeries {
                    ticker,
                    date: window[1].date,
                });
            }
        }
        Ok(Self { ticker, bars })
    }

    /// Build from bars already known to be ordered (a suffix of a validated
    /// series).
    pub(crate) fn from_ordered(ticker: String, bars: Vec<PriceBar>) -> Self {
        Self { ticker, bars }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    /// Last `n` bars, or the whole series if shorter.
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }
}

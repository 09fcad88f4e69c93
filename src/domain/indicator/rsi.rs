//! RSI (Relative Strength Index) indicator.
//!
//! Average gain/loss is a simple rolling mean over the last n price changes,
//! RSI = 100 - 100/(1 + avg_gain/avg_loss). If avg_loss == 0 the RSI is 100
//! exactly; the ratio is never allowed to divide by zero.
//!
//! Warmup: the first n bars are invalid (the change at index 0 is undefined,
//! and n changes are needed to fill the window).

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::price::PriceBar;

pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    let mut gains: Vec<f64> = Vec::new();
    let mut losses: Vec<f64> = Vec::new();
    for w in bars.windows(2) {
        let change = w[1].close - w[0].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut values = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        // Change index i-1 is the most recent one known at bar i.
        let valid = period > 0 && i >= period;
        let value = if valid {
            let window_start = i - period;
            let avg_gain = gains[window_start..i].iter().sum::<f64>() / period as f64;
            let avg_loss = losses[window_start..i].iter().sum::<f64>() / period as f64;

            if avg_loss == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
            }
        } else {
            0.0
        };

        values.push(IndicatorPoint {
            date: bar.date,
            valid,
            value: IndicatorValue::Simple(value),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

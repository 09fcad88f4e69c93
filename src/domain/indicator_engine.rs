//! Standard indicator set computed in one pass over a price series.

use std::collections::HashMap;

use crate::domain::error::TickerlensError;
use crate::domain::indicator::{
    calculate_atr, calculate_bollinger, calculate_ema, calculate_macd_default, calculate_rsi,
    calculate_sma, IndicatorSeries, IndicatorType,
};
use crate::domain::price::PriceSeries;

pub const SMA_SHORT: usize = 20;
pub const SMA_LONG: usize = 50;
pub const EMA_PERIOD: usize = 20;
pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_MULT_X100: u32 = 200;

/// Compute the standard published indicator set: SMA(20), SMA(50), EMA(20),
/// RSI(14), Bollinger(20, 2), MACD(12,26,9), ATR(14).
///
/// A series shorter than an indicator's window still yields that indicator,
/// just with every position invalid; only a completely empty input is
/// rejected.
pub fn compute_indicators(
    series: &PriceSeries,
) -> Result<HashMap<IndicatorType, IndicatorSeries>, TickerlensError> {
    if series.is_empty() {
        return Err(TickerlensError::EmptySeries {
            ticker: series.ticker().to_string(),
        });
    }

    let bars = series.bars();
    let computed = [
        calculate_sma(bars, SMA_SHORT),
        calculate_sma(bars, SMA_LONG),
        calculate_ema(bars, EMA_PERIOD),
        calculate_rsi(bars, RSI_PERIOD),
        calculate_bollinger(bars, BOLLINGER_PERIOD, BOLLINGER_MULT_X100),
        calculate_macd_default(bars),
        calculate_atr(bars, ATR_PERIOD),
    ];

    Ok(computed
        .into_iter()
        .map(|s| (s.indicator_type.clone(), s))
        .collect())
}

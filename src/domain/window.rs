//! Lookback trimming of buffered series.
//!
//! History is fetched with extra buffer days so rolling windows are already
//! seeded at the start of the publish window; after computing, the buffer is
//! cut away here. Works on both price bars and computed indicator series so
//! the two stay date-aligned after the cut.

use chrono::{Duration, NaiveDate};

use crate::domain::indicator::{IndicatorSeries, IndicatorPoint};
use crate::domain::price::PriceSeries;

/// Suffix of `series` with date >= anchor - lookback. Idempotent.
pub fn trim_bars(series: &PriceSeries, lookback: Duration, anchor: NaiveDate) -> PriceSeries {
    let cutoff = anchor - lookback;
    let bars = series
        .bars()
        .iter()
        .filter(|b| b.date >= cutoff)
        .cloned()
        .collect();
    PriceSeries::from_ordered(series.ticker().to_string(), bars)
}

/// Same cut applied to an indicator series.
pub fn trim_indicators(
    series: &IndicatorSeries,
    lookback: Duration,
    anchor: NaiveDate,
) -> IndicatorSeries {
    let cutoff = anchor - lookback;
    let values: Vec<IndicatorPoint> = series
        .values
        .iter()
        .filter(|p| p.date >= cutoff)
        .cloned()
        .collect();
    IndicatorSeries {
        indicator_type: series.indicator_type.clone(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::calculate_sma;
    use crate::domain::price::PriceBar;

    fn make_series(start: NaiveDate, days: usize) -> PriceSeries {
        let bars = (0..days)
            .map(|i| {
                let close = 100.0 + i as f64;
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1000,
                }
            })
            .collect();
        PriceSeries::new("AAPL".into(), bars).unwrap()
    }

    #[test]
    fn trim_keeps_suffix_from_cutoff() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = make_series(start, 30);
        let anchor = start + Duration::days(29);

        let trimmed = trim_bars(&series, Duration::days(10), anchor);

        assert_eq!(trimmed.len(), 11);
        assert_eq!(trimmed.bars()[0].date, anchor - Duration::days(10));
        assert_eq!(trimmed.bars().last().unwrap().date, anchor);
    }

    #[test]
    fn trim_is_idempotent() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = make_series(start, 30);
        let anchor = start + Duration::days(29);
        let lookback = Duration::days(7);

        let once = trim_bars(&series, lookback, anchor);
        let twice = trim_bars(&once, lookback, anchor);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.bars().iter().zip(twice.bars()) {
            assert_eq!(a.date, b.date);
            assert!((a.close - b.close).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn trim_longer_than_series_is_noop() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = make_series(start, 10);
        let anchor = start + Duration::days(9);

        let trimmed = trim_bars(&series, Duration::days(365), anchor);
        assert_eq!(trimmed.len(), 10);
    }

    #[test]
    fn trim_can_empty_a_series() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = make_series(start, 5);
        let anchor = start + Duration::days(365);

        let trimmed = trim_bars(&series, Duration::days(10), anchor);
        assert!(trimmed.is_empty());
    }

    #[test]
    fn trim_indicators_drops_seeded_warmup() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = make_series(start, 30);
        let anchor = start + Duration::days(29);

        let sma = calculate_sma(series.bars(), 5);
        let trimmed = trim_indicators(&sma, Duration::days(10), anchor);

        assert_eq!(trimmed.values.len(), 11);
        // Window was seeded inside the buffer, so everything kept is valid.
        assert!(trimmed.values.iter().all(|p| p.valid));
        assert_eq!(trimmed.values[0].date, anchor - Duration::days(10));
    }

    #[test]
    fn trimmed_bars_and_indicators_stay_aligned() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = make_series(start, 40);
        let anchor = start + Duration::days(39);
        let lookback = Duration::days(20);

        let sma = calculate_sma(series.bars(), 10);
        let bars = trim_bars(&series, lookback, anchor);
        let indicators = trim_indicators(&sma, lookback, anchor);

        assert_eq!(bars.len(), indicators.values.len());
        for (bar, point) in bars.bars().iter().zip(&indicators.values) {
            assert_eq!(bar.date, point.date);
        }
    }
}

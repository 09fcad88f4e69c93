#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;

use tickerlens::domain::error::TickerlensError;
pub use tickerlens::domain::price::{PriceBar, PriceSeries};
use tickerlens::ports::data_port::DataPort;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn make_bar(day: NaiveDate, close: f64) -> PriceBar {
    PriceBar {
        date: day,
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 10_000,
    }
}

/// Daily bars starting at `start`, one per calendar day, closes generated by
/// a deterministic wavy walk around `base`.
pub fn generate_series(ticker: &str, start: NaiveDate, days: usize, base: f64) -> PriceSeries {
    let bars = (0..days)
        .map(|i| {
            let close = base + ((i * 13) % 23) as f64 - 11.0;
            make_bar(start + chrono::Duration::days(i as i64), close)
        })
        .collect();
    PriceSeries::new(ticker.to_string(), bars).unwrap()
}

pub fn series_from_closes(ticker: &str, start: NaiveDate, closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(start + chrono::Duration::days(i as i64), close))
        .collect();
    PriceSeries::new(ticker.to_string(), bars).unwrap()
}

pub struct MockDataPort {
    pub data: HashMap<String, PriceSeries>,
    pub names: HashMap<String, String>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            names: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.data.insert(series.ticker().to_string(), series);
        self
    }

    pub fn with_name(mut self, ticker: &str, name: &str) -> Self {
        self.names.insert(ticker.to_string(), name.to_string());
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_history(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, TickerlensError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TickerlensError::Data {
                reason: reason.clone(),
            });
        }

        let series = match self.data.get(ticker) {
            Some(series) => series,
            None => return PriceSeries::new(ticker.to_string(), vec![]),
        };

        let bars = series
            .bars()
            .iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .cloned()
            .collect();
        PriceSeries::new(ticker.to_string(), bars)
    }

    fn fetch_company_name(&self, ticker: &str) -> Result<Option<String>, TickerlensError> {
        Ok(self.names.get(ticker).cloned())
    }

    fn list_tickers(&self) -> Result<Vec<String>, TickerlensError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

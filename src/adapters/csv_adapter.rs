//! CSV file data adapter.
//!
//! One `<TICKER>.csv` file per instrument with a
//! `date,open,high,low,close,volume` header, plus an optional
//! `<TICKER>.name` sidecar holding the company name.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::TickerlensError;
use crate::domain::price::{PriceBar, PriceSeries};
use crate::ports::data_port::DataPort;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    fn name_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.name", ticker))
    }
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, name: &str) -> Result<&'r str, TickerlensError> {
    record.get(index).ok_or_else(|| TickerlensError::Data {
        reason: format!("missing {} column", name),
    })
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, TickerlensError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| TickerlensError::Data {
        reason: format!("invalid {} value: {}", name, e),
    })
}

impl DataPort for CsvDataAdapter {
    fn fetch_history(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, TickerlensError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| TickerlensError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TickerlensError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                TickerlensError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(PriceBar {
                date,
                open: parse_field(field(&record, 1, "open")?, "open")?,
                high: parse_field(field(&record, 2, "high")?, "high")?,
                low: parse_field(field(&record, 3, "low")?, "low")?,
                close: parse_field(field(&record, 4, "close")?, "close")?,
                volume: parse_field(field(&record, 5, "volume")?, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        PriceSeries::new(ticker.to_string(), bars)
    }

    fn fetch_company_name(&self, ticker: &str) -> Result<Option<String>, TickerlensError> {
        let path = self.name_path(ticker);
        if !path.exists() {
            return Ok(None);
        }
        let name = fs::read_to_string(&path).map_err(|e| TickerlensError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let name = name.trim();
        Ok(if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        })
    }

    fn list_tickers(&self) -> Result<Vec<String>, TickerlensError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TickerlensError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TickerlensError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}

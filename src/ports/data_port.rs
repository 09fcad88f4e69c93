//! Market-data access port trait.

use chrono::NaiveDate;

use crate::domain::error::TickerlensError;
use crate::domain::price::PriceSeries;

/// Upstream source of daily price history and instrument metadata.
///
/// `fetch_history` may legitimately return an empty series (unknown ticker
/// or no bars in range); callers treat that as an input-validation failure
/// before any analytics run.
pub trait DataPort {
    fn fetch_history(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, TickerlensError>;

    fn fetch_company_name(&self, ticker: &str) -> Result<Option<String>, TickerlensError>;

    fn list_tickers(&self) -> Result<Vec<String>, TickerlensError>;
}

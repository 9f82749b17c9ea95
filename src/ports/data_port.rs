//! Market-data access port trait.

use crate::domain::error::AlphalabError;
use crate::domain::ohlcv::PriceSeries;
use chrono::NaiveDate;

pub trait DataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, AlphalabError>;

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, AlphalabError>;

    /// First date, last date, and bar count for a symbol, if any data exists.
    fn data_range(
        &self,
        symbol: &str,
        exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, AlphalabError>;
}

//! CSV file data adapter.
//!
//! One file per symbol at `<base>/<SYMBOL>_<EXCHANGE>.csv` with a header
//! naming at least date + the five OHLCV columns, in any order.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::AlphalabError;
use crate::domain::ohlcv::{PriceSeries, REQUIRED_COLUMNS};
use crate::ports::data_port::DataPort;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, exchange: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}_{exchange}.csv"))
    }

    fn read_rows(
        &self,
        symbol: &str,
        exchange: &str,
    ) -> Result<(Vec<NaiveDate>, BTreeMap<String, Vec<f64>>), AlphalabError> {
        let path = self.csv_path(symbol, exchange);
        let content = fs::read_to_string(&path).map_err(|e| AlphalabError::Data {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| AlphalabError::Data {
                reason: format!("CSV header error: {e}"),
            })?
            .clone();

        let date_index = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("date"))
            .ok_or_else(|| AlphalabError::MissingColumn {
                column: "date".to_string(),
            })?;

        let mut column_indexes = Vec::new();
        for name in REQUIRED_COLUMNS {
            let index = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| AlphalabError::MissingColumn {
                    column: name.to_string(),
                })?;
            column_indexes.push((name, index));
        }

        let mut dates = Vec::new();
        let mut columns: BTreeMap<String, Vec<f64>> = REQUIRED_COLUMNS
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        for result in reader.records() {
            let record = result.map_err(|e| AlphalabError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;

            let date_str = record.get(date_index).unwrap_or_default();
            let date =
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| AlphalabError::Data {
                    reason: format!("invalid date {date_str:?}: {e}"),
                })?;
            dates.push(date);

            for (name, index) in &column_indexes {
                let raw = record.get(*index).unwrap_or_default();
                let value: f64 = raw.parse().map_err(|_| AlphalabError::Data {
                    reason: format!("invalid {name} value {raw:?} on {date}"),
                })?;
                if let Some(column) = columns.get_mut(*name) {
                    column.push(value);
                }
            }
        }

        Ok((dates, columns))
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, AlphalabError> {
        let (dates, columns) = self.read_rows(symbol, exchange)?;

        let keep: Vec<usize> = dates
            .iter()
            .enumerate()
            .filter(|(_, d)| **d >= start_date && **d <= end_date)
            .map(|(i, _)| i)
            .collect();

        let filtered_dates: Vec<NaiveDate> = keep.iter().map(|&i| dates[i]).collect();
        let filtered_columns: BTreeMap<String, Vec<f64>> = columns
            .into_iter()
            .map(|(name, values)| (name, keep.iter().map(|&i| values[i]).collect()))
            .collect();

        PriceSeries::from_columns(symbol, exchange, filtered_dates, filtered_columns)
    }

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, AlphalabError> {
        let suffix = format!("_{exchange}.csv");
        let mut symbols = Vec::new();
        for entry in fs::read_dir(&self.base_path).map_err(|e| AlphalabError::Data {
            reason: format!("failed to read {}: {e}", self.base_path.display()),
        })? {
            let entry = entry.map_err(AlphalabError::Io)?;
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(symbol) = name.strip_suffix(&suffix) {
                symbols.push(symbol.to_string());
            }
        }
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
        exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, AlphalabError> {
        if !self.csv_path(symbol, exchange).exists() {
            return Ok(None);
        }
        let (dates, _) = self.read_rows(symbol, exchange)?;
        match (dates.iter().min(), dates.iter().max()) {
            (Some(&first), Some(&last)) => Ok(Some((first, last, dates.len()))),
            _ => Ok(None),
        }
    }
}

//! OHLCV bars and the price series container.
//!
//! A [`PriceSeries`] is column-oriented: named `f64` columns aligned to a
//! strictly increasing date index. Indicator and scoring stages read columns
//! by name so that a partially populated series (e.g. close-only) is
//! representable and detectable.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::error::AlphalabError;

/// Columns every full OHLCV series must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub exchange: String,
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl PriceSeries {
    /// Build a series from complete bars. Dates must be strictly increasing.
    pub fn from_bars(
        symbol: &str,
        exchange: &str,
        bars: &[OhlcvBar],
    ) -> Result<Self, AlphalabError> {
        let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();
        let mut columns = BTreeMap::new();
        columns.insert("open".to_string(), bars.iter().map(|b| b.open).collect());
        columns.insert("high".to_string(), bars.iter().map(|b| b.high).collect());
        columns.insert("low".to_string(), bars.iter().map(|b| b.low).collect());
        columns.insert("close".to_string(), bars.iter().map(|b| b.close).collect());
        columns.insert(
            "volume".to_string(),
            bars.iter().map(|b| b.volume).collect(),
        );
        Self::from_columns(symbol, exchange, dates, columns)
    }

    /// Build a series from named columns. Every column must match the date
    /// index length; dates must be strictly increasing.
    pub fn from_columns(
        symbol: &str,
        exchange: &str,
        dates: Vec<NaiveDate>,
        columns: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self, AlphalabError> {
        for window in dates.windows(2) {
            if window[1] <= window[0] {
                return Err(AlphalabError::Data {
                    reason: format!(
                        "timestamps not strictly increasing: {} then {}",
                        window[0], window[1]
                    ),
                });
            }
        }
        for (name, values) in &columns {
            if values.len() != dates.len() {
                return Err(AlphalabError::Data {
                    reason: format!(
                        "column {} has {} values for {} dates",
                        name,
                        values.len(),
                        dates.len()
                    ),
                });
            }
        }
        Ok(PriceSeries {
            symbol: symbol.to_string(),
            exchange: exchange.to_string(),
            dates,
            columns,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Column access that fails with the missing-column error.
    pub fn require(&self, name: &str) -> Result<&[f64], AlphalabError> {
        self.column(name).ok_or_else(|| AlphalabError::MissingColumn {
            column: name.to_string(),
        })
    }

    pub fn columns(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar(day: u32, close: f64) -> OhlcvBar {
        OhlcvBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 10_000.0,
        }
    }

    #[test]
    fn from_bars_builds_all_required_columns() {
        let bars = vec![sample_bar(1, 100.0), sample_bar(2, 101.0)];
        let series = PriceSeries::from_bars("RELIANCE", "NSE", &bars).unwrap();

        assert_eq!(series.len(), 2);
        for name in REQUIRED_COLUMNS {
            assert!(series.column(name).is_some(), "missing {name}");
        }
        assert_eq!(series.column("close").unwrap(), &[100.0, 101.0]);
    }

    #[test]
    fn from_bars_rejects_unordered_dates() {
        let bars = vec![sample_bar(2, 100.0), sample_bar(1, 101.0)];
        let err = PriceSeries::from_bars("RELIANCE", "NSE", &bars).unwrap_err();
        assert!(matches!(err, AlphalabError::Data { .. }));
    }

    #[test]
    fn from_bars_rejects_duplicate_dates() {
        let bars = vec![sample_bar(1, 100.0), sample_bar(1, 101.0)];
        assert!(PriceSeries::from_bars("RELIANCE", "NSE", &bars).is_err());
    }

    #[test]
    fn from_columns_rejects_length_mismatch() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        ];
        let mut columns = BTreeMap::new();
        columns.insert("close".to_string(), vec![100.0]);
        let err = PriceSeries::from_columns("RELIANCE", "NSE", dates, columns).unwrap_err();
        assert!(matches!(err, AlphalabError::Data { .. }));
    }

    #[test]
    fn require_reports_missing_column() {
        let dates = vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()];
        let mut columns = BTreeMap::new();
        columns.insert("close".to_string(), vec![100.0]);
        let series = PriceSeries::from_columns("RELIANCE", "NSE", dates, columns).unwrap();

        assert!(series.require("close").is_ok());
        let err = series.require("volume").unwrap_err();
        assert!(matches!(err, AlphalabError::MissingColumn { column } if column == "volume"));
    }

    #[test]
    fn empty_series() {
        let series =
            PriceSeries::from_columns("RELIANCE", "NSE", Vec::new(), BTreeMap::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
        assert_eq!(series.last_date(), None);
    }
}

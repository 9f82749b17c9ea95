#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;

use alphalab::domain::error::AlphalabError;
use alphalab::domain::frame::IndicatorFrame;
pub use alphalab::domain::ohlcv::{OhlcvBar, PriceSeries};
use alphalab::domain::signal::StrategySignal;
use alphalab::ports::data_port::DataPort;
use alphalab::ports::strategy_port::StrategyPort;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn make_bar(day_offset: i64, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: date(2023, 1, 2) + chrono::Duration::days(day_offset),
        open: close * 0.999,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume: 10_000.0,
    }
}

/// Series with realistic bar geometry around the given closes.
pub fn make_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let bars: Vec<OhlcvBar> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i as i64, close))
        .collect();
    PriceSeries::from_bars(symbol, "NSE", &bars).unwrap()
}

/// Zero-volatility series: every bar is a point at the same price.
pub fn flat_series(symbol: &str, bars: usize, price: f64) -> PriceSeries {
    let bars: Vec<OhlcvBar> = (0..bars)
        .map(|i| OhlcvBar {
            date: date(2020, 1, 1) + chrono::Duration::days(i as i64),
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 10_000.0,
        })
        .collect();
    PriceSeries::from_bars(symbol, "NSE", &bars).unwrap()
}

/// Deterministic wave with a gentle upward drift.
pub fn wavy_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + ((i * 13) % 29) as f64 - 14.0 + i as f64 * 0.05)
        .collect()
}

pub struct MockDataPort {
    pub series: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, symbol: &str, series: PriceSeries) -> Self {
        self.series.insert(symbol.to_string(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        exchange: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<PriceSeries, AlphalabError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(AlphalabError::Data {
                reason: reason.clone(),
            });
        }
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| AlphalabError::NoData {
                symbol: symbol.to_string(),
                exchange: exchange.to_string(),
            })
    }

    fn list_symbols(&self, _exchange: &str) -> Result<Vec<String>, AlphalabError> {
        let mut symbols: Vec<String> = self.series.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
        _exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, AlphalabError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(AlphalabError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.series.get(symbol).and_then(|series| {
            match (series.first_date(), series.last_date()) {
                (Some(first), Some(last)) => Some((first, last, series.len())),
                _ => None,
            }
        }))
    }
}

/// Strategy port that hands back a fixed signal list regardless of input.
pub struct FixedStrategyPort {
    pub signals: Vec<StrategySignal>,
}

impl StrategyPort for FixedStrategyPort {
    fn generate(
        &self,
        _symbol: &str,
        _frame: &IndicatorFrame,
    ) -> Result<Vec<StrategySignal>, AlphalabError> {
        Ok(self.signals.clone())
    }
}

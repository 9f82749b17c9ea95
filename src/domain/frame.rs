//! Indicator frame: a price series extended with named derived columns.
//!
//! Derived columns use `f64::NAN` for "indicator unavailable" while the
//! battery is being computed; the orchestrator replaces non-finite values
//! with 0 once the full battery is in place. Consumers that may see a
//! partially built frame go through [`IndicatorFrame::latest`] /
//! [`IndicatorFrame::value_at`], which surface unavailable cells as `None`.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::error::AlphalabError;
use super::ohlcv::PriceSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub symbol: String,
    pub exchange: String,
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl IndicatorFrame {
    /// Start a frame from a price series, copying its columns.
    pub fn from_series(series: &PriceSeries) -> Self {
        IndicatorFrame {
            symbol: series.symbol.clone(),
            exchange: series.exchange.clone(),
            dates: series.dates().to_vec(),
            columns: series.columns().clone(),
        }
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

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Add a derived column. Length must match the date index.
    pub fn insert(&mut self, name: &str, values: Vec<f64>) -> Result<(), AlphalabError> {
        if values.len() != self.dates.len() {
            return Err(AlphalabError::Data {
                reason: format!(
                    "derived column {} has {} values for {} dates",
                    name,
                    values.len(),
                    self.dates.len()
                ),
            });
        }
        self.columns.insert(name.to_string(), values);
        Ok(())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    /// Value at an index, `None` when the column is absent or the cell is
    /// unavailable (non-finite).
    pub fn value_at(&self, name: &str, index: usize) -> Option<f64> {
        let values = self.columns.get(name)?;
        let v = *values.get(index)?;
        v.is_finite().then_some(v)
    }

    /// Most recent value of a column, `None` when absent or unavailable.
    pub fn latest(&self, name: &str) -> Option<f64> {
        if self.dates.is_empty() {
            return None;
        }
        self.value_at(name, self.dates.len() - 1)
    }

    /// Replace every non-finite cell of a derived column with 0.
    pub fn fill_unavailable(&mut self, name: &str) {
        if let Some(values) = self.columns.get_mut(name) {
            for v in values.iter_mut() {
                if !v.is_finite() {
                    *v = 0.0;
                }
            }
        }
    }
}

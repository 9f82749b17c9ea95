//! Position and trade ledger records.

use chrono::NaiveDate;
use serde::Serialize;

/// A single open long position. Quantity is fractional: entries size the
/// position to consume all available cash net of frictions.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub quantity: f64,
    pub entry_price: f64,
    pub entry_date: NaiveDate,
    pub entry_index: usize,
    /// Cash consumed to open, frictions included. Round-trip P&L is measured
    /// against this.
    pub entry_value: f64,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.market_value(price) - self.entry_value
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedTrade {
    pub quantity: f64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub bars_held: usize,
    pub pnl: f64,
}

impl ClosedTrade {
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }
}

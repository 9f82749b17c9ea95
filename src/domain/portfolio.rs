//! Portfolio state, equity tracking, and daily returns.

use chrono::NaiveDate;

use super::position::{ClosedTrade, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Single-symbol long/flat portfolio driven by one strategy's signals.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub initial_capital: f64,
    pub cash: f64,
    pub position: Option<Position>,
    pub closed_trades: Vec<ClosedTrade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Portfolio {
            initial_capital,
            cash: initial_capital,
            position: None,
            closed_trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.position.is_none()
    }

    pub fn open_position(&mut self, position: Position) {
        self.position = Some(position);
    }

    pub fn close_position(&mut self) -> Option<Position> {
        self.position.take()
    }

    pub fn record_trade(&mut self, trade: ClosedTrade) {
        self.closed_trades.push(trade);
    }

    pub fn record_equity(&mut self, date: NaiveDate, equity: f64) {
        self.equity_curve.push(EquityPoint { date, equity });
    }

    pub fn final_equity(&self) -> f64 {
        self.equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.initial_capital)
    }

    /// Per-bar returns over the equity curve. Bar 0 is measured against the
    /// initial capital, so entry frictions on the first bar show up as a
    /// negative first return.
    pub fn daily_returns(&self) -> Vec<f64> {
        let mut returns = Vec::with_capacity(self.equity_curve.len());
        let mut prev = self.initial_capital;
        for point in &self.equity_curve {
            if prev > 0.0 {
                returns.push(point.equity / prev - 1.0);
            } else {
                returns.push(0.0);
            }
            prev = point.equity;
        }
        returns
    }
}

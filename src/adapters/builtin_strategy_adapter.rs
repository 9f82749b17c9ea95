//! Deterministic strategy catalogue.
//!
//! Implements the few-shot example strategies as signal generators over an
//! indicator frame. This is the offline `StrategyPort`: the production seam
//! is an LLM that emits the same shape, so everything downstream of the
//! port is testable without a network.

use crate::domain::error::AlphalabError;
use crate::domain::frame::IndicatorFrame;
use crate::domain::indicator::{
    ATR14, BB_LOWER, BB_UPPER, EMA21, EMA9, MACD, MACD_SIGNAL, RSI14,
};
use crate::domain::signal::StrategySignal;
use crate::ports::strategy_port::StrategyPort;

pub struct BuiltinStrategyAdapter;

/// True where `a` crosses above `b` on bar `i`. All four cells must be live
/// (zero-filled warmup cells never trigger a cross).
fn cross_above(a: &[f64], b: &[f64], i: usize) -> bool {
    i > 0
        && a[i] != 0.0
        && b[i] != 0.0
        && a[i - 1] != 0.0
        && b[i - 1] != 0.0
        && a[i] > b[i]
        && a[i - 1] <= b[i - 1]
}

fn cross_below(a: &[f64], b: &[f64], i: usize) -> bool {
    i > 0
        && a[i] != 0.0
        && b[i] != 0.0
        && a[i - 1] != 0.0
        && b[i - 1] != 0.0
        && a[i] < b[i]
        && a[i - 1] >= b[i - 1]
}

impl BuiltinStrategyAdapter {
    fn ema_crossover(frame: &IndicatorFrame) -> Option<StrategySignal> {
        let fast = frame.column(EMA9)?;
        let slow = frame.column(EMA21)?;
        let n = frame.len();
        let entries = (0..n).map(|i| cross_above(fast, slow, i)).collect();
        let exits = (0..n).map(|i| cross_below(fast, slow, i)).collect();
        Some(StrategySignal::new("EMA Crossover", entries, exits))
    }

    fn macd_rsi_confirmation(frame: &IndicatorFrame) -> Option<StrategySignal> {
        let macd = frame.column(MACD)?;
        let signal = frame.column(MACD_SIGNAL)?;
        let rsi = frame.column(RSI14)?;
        let n = frame.len();
        let entries = (0..n)
            .map(|i| cross_above(macd, signal, i) && rsi[i] < 30.0)
            .collect();
        let exits = (0..n)
            .map(|i| cross_below(macd, signal, i) || rsi[i] > 70.0)
            .collect();
        Some(StrategySignal::new("MACD + RSI Confirmation", entries, exits))
    }

    fn bollinger_reversal(frame: &IndicatorFrame) -> Option<StrategySignal> {
        let closes = frame.column("close")?;
        let lower = frame.column(BB_LOWER)?;
        let upper = frame.column(BB_UPPER)?;
        let rsi = frame.column(RSI14)?;
        let n = frame.len();
        let entries = (0..n)
            .map(|i| lower[i] > 0.0 && closes[i] < lower[i] && rsi[i] < 30.0)
            .collect();
        let exits = (0..n)
            .map(|i| (upper[i] > 0.0 && closes[i] > upper[i]) || rsi[i] > 70.0)
            .collect();
        Some(StrategySignal::new("Bollinger Band Reversal", entries, exits))
    }

    fn atr_breakout(frame: &IndicatorFrame) -> Option<StrategySignal> {
        let closes = frame.column("close")?;
        let highs = frame.column("high")?;
        let lows = frame.column("low")?;
        let atr = frame.column(ATR14)?;
        let n = frame.len();
        let entries = (0..n)
            .map(|i| i > 0 && atr[i] > 0.0 && closes[i] > highs[i - 1] + 1.5 * atr[i])
            .collect();
        let exits = (0..n)
            .map(|i| i > 0 && atr[i] > 0.0 && closes[i] < lows[i - 1] - atr[i])
            .collect();
        Some(StrategySignal::new("ATR Breakout", entries, exits))
    }
}

impl StrategyPort for BuiltinStrategyAdapter {
    fn generate(
        &self,
        _symbol: &str,
        frame: &IndicatorFrame,
    ) -> Result<Vec<StrategySignal>, AlphalabError> {
        Ok([
            Self::ema_crossover(frame),
            Self::macd_rsi_confirmation(frame),
            Self::bollinger_reversal(frame),
            Self::atr_breakout(frame),
        ]
        .into_iter()
        .flatten()
        .collect())
    }
}

//! Volatility component: ATR as a fraction of price.

use serde::Serialize;

use crate::domain::frame::IndicatorFrame;
use crate::domain::indicator::ATR14;

pub const MIN_BARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityScore {
    /// min(ATR% / 5, 1): a 5% ATR-to-price reading saturates at 1. The
    /// combiner inverts this so calmer series score higher.
    pub score: f64,
    pub atr_pct: Option<f64>,
}

pub fn volatility_score(frame: &IndicatorFrame) -> VolatilityScore {
    let none = VolatilityScore {
        score: 0.0,
        atr_pct: None,
    };
    if frame.len() < MIN_BARS || !frame.has_column(ATR14) {
        return none;
    }
    let (Some(atr), Some(close)) = (frame.latest(ATR14), frame.latest("close")) else {
        return none;
    };
    if close <= 0.0 {
        return none;
    }

    let atr_pct = atr / close * 100.0;
    VolatilityScore {
        score: (atr_pct / 5.0).min(1.0),
        atr_pct: Some(atr_pct),
    }
}

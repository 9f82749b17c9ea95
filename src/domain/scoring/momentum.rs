//! Momentum component: percent price change over several lookback windows.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::frame::IndicatorFrame;
use crate::domain::metrics::mean;

pub const MOMENTUM_WINDOWS: [usize; 4] = [5, 10, 20, 60];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentumScore {
    /// Percent change keyed by window ("5d", "10d", ...). Only windows with
    /// more history than their length contribute.
    pub by_window: BTreeMap<String, f64>,
    /// Mean of the contributing windows; `None` when none have history.
    pub overall: Option<f64>,
}

pub fn momentum_score(frame: &IndicatorFrame) -> MomentumScore {
    let mut by_window = BTreeMap::new();

    if let Some(closes) = frame.column("close") {
        let n = closes.len();
        for window in MOMENTUM_WINDOWS {
            if n > window {
                let current = closes[n - 1];
                let base = closes[n - 1 - window];
                let pct = (current / base - 1.0) * 100.0;
                if pct.is_finite() {
                    by_window.insert(format!("{window}d"), pct);
                }
            }
        }
    }

    let overall = if by_window.is_empty() {
        None
    } else {
        let values: Vec<f64> = by_window.values().copied().collect();
        Some(mean(&values))
    };

    MomentumScore { by_window, overall }
}

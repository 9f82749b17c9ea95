//! Average True Range.
//!
//! TR[0] = high - low; TR[i] = max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the Wilder smoothing of TR: seed with the mean of the first n true
//! ranges, then ATR = (prev * (n-1) + TR) / n.
//! Warmup: first (n-1) values are unavailable.

use crate::domain::indicator_helpers::wilder_smooth;

pub const DEFAULT_PERIOD: usize = 14;

pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut tr = Vec::with_capacity(n);
    for i in 0..n {
        let hl = highs[i] - lows[i];
        if i == 0 {
            tr.push(hl);
        } else {
            let hc = (highs[i] - closes[i - 1]).abs();
            let lc = (lows[i] - closes[i - 1]).abs();
            tr.push(hl.max(hc).max(lc));
        }
    }
    wilder_smooth(&tr, period)
}

//! Stochastic oscillator.
//!
//! Raw %K = (close - lowest_low(n)) / (highest_high(n) - lowest_low(n)) * 100,
//! unavailable when the range is zero. %K is the smooth-period SMA of raw %K,
//! %D the d-period SMA of %K. Defaults: 14, 3, 3.

use crate::domain::indicator_helpers::rolling_mean;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_SMOOTH_K: usize = 3;
pub const DEFAULT_D_PERIOD: usize = 3;

pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    smooth_k: usize,
    d_period: usize,
) -> (Vec<f64>, Vec<f64>) {
    let n = closes.len();
    if k_period == 0 || smooth_k == 0 || d_period == 0 {
        return (vec![f64::NAN; n], vec![f64::NAN; n]);
    }

    let mut raw = vec![f64::NAN; n];
    for i in 0..n {
        if i + 1 < k_period {
            continue;
        }
        let window = i + 1 - k_period..=i;
        let hh = highs[window.clone()].iter().cloned().fold(f64::MIN, f64::max);
        let ll = lows[window].iter().cloned().fold(f64::MAX, f64::min);
        let range = hh - ll;
        if range > 0.0 {
            raw[i] = (closes[i] - ll) / range * 100.0;
        }
    }

    let k = rolling_mean(&raw, smooth_k);
    let d = rolling_mean(&k, d_period);
    (k, d)
}

pub fn stochastic_default(highs: &[f64], lows: &[f64], closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    stochastic(
        highs,
        lows,
        closes,
        DEFAULT_K_PERIOD,
        DEFAULT_SMOOTH_K,
        DEFAULT_D_PERIOD,
    )
}

//! Bollinger Bands.
//!
//! Middle: SMA over n periods; Upper/Lower: Middle ± multiplier × StdDev,
//! where StdDev is population standard deviation (divides by N, not N-1).
//! Default parameters: period=20, multiplier=2.0.
//! Warmup: first (period-1) values are unavailable.

use crate::domain::indicator_helpers::{rolling_mean, rolling_std};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub lower: Vec<f64>,
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
}

pub fn bollinger(values: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let middle = rolling_mean(values, period);
    let std = rolling_std(values, period);

    let upper: Vec<f64> = middle
        .iter()
        .zip(std.iter())
        .map(|(m, s)| m + multiplier * s)
        .collect();
    let lower: Vec<f64> = middle
        .iter()
        .zip(std.iter())
        .map(|(m, s)| m - multiplier * s)
        .collect();

    BollingerBands {
        lower,
        middle,
        upper,
    }
}

pub fn bollinger_default(values: &[f64]) -> BollingerBands {
    bollinger(values, DEFAULT_PERIOD, DEFAULT_MULTIPLIER)
}

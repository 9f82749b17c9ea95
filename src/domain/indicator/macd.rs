//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of the MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9.
//! Warmup: the line is unavailable before (slow-1), the signal and histogram
//! before (slow-1 + signal-1).

use super::ema::ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(values: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdOutput {
    let n = values.len();
    if fast == 0 || slow == 0 || signal_period == 0 {
        return MacdOutput {
            line: vec![f64::NAN; n],
            signal: vec![f64::NAN; n],
            histogram: vec![f64::NAN; n],
        };
    }

    let ema_fast = ema(values, fast);
    let ema_slow = ema(values, slow);

    // NaN warmup propagates from whichever EMA is still warming up.
    let line: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();

    let line_start = slow.max(fast) - 1;
    let mut signal = vec![f64::NAN; n];
    if line_start + signal_period <= n {
        let k = 2.0 / (signal_period as f64 + 1.0);
        let seed: f64 = line[line_start..line_start + signal_period]
            .iter()
            .sum::<f64>()
            / signal_period as f64;
        let mut current = seed;
        signal[line_start + signal_period - 1] = current;
        for i in line_start + signal_period..n {
            current = line[i] * k + current * (1.0 - k);
            signal[i] = current;
        }
    }

    let histogram: Vec<f64> = line.iter().zip(signal.iter()).map(|(l, s)| l - s).collect();

    MacdOutput {
        line,
        signal,
        histogram,
    }
}

pub fn macd_default(values: &[f64]) -> MacdOutput {
    macd(values, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

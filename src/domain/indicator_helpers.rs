//! Shared helper functions for indicator calculations.
//!
//! All helpers return one value per input element, with `f64::NAN` marking
//! warmup bars that do not yet have a full window.

/// Rolling arithmetic mean over `period` elements. A window containing an
/// unavailable value stays unavailable.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < period {
            out.push(f64::NAN);
            continue;
        }
        let window = &values[i + 1 - period..=i];
        out.push(window.iter().sum::<f64>() / period as f64);
    }
    out
}

/// Rolling population standard deviation (divides by N, not N-1).
pub fn rolling_std(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < period {
            out.push(f64::NAN);
            continue;
        }
        let window = &values[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        out.push(variance.sqrt());
    }
    out
}

/// Wilder smoothing: seed with the mean of the first full window of finite
/// values, then `smoothed = (prev * (period - 1) + value) / period`.
///
/// A leading NaN prefix in the input extends the warmup accordingly.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 {
        return out;
    }

    let start = match values.iter().position(|v| v.is_finite()) {
        Some(s) => s,
        None => return out,
    };
    if start + period > values.len() {
        return out;
    }

    let seed: f64 = values[start..start + period].iter().sum::<f64>() / period as f64;
    let mut smoothed = seed;
    out[start + period - 1] = smoothed;
    for i in start + period..values.len() {
        smoothed = (smoothed * (period - 1) as f64 + values[i]) / period as f64;
        out[i] = smoothed;
    }
    out
}

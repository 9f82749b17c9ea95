//! RSI (Relative Strength Index).
//!
//! Uses Wilder's smoothing for average gain/loss:
//! - First average: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss)); if avg_loss == 0: RSI = 100.
//! Warmup: first n values are unavailable (n price changes are needed).

pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < 2 {
        return vec![f64::NAN; values.len()];
    }

    let mut out = vec![f64::NAN; values.len()];

    let mut gains = Vec::with_capacity(values.len() - 1);
    let mut losses = Vec::with_capacity(values.len() - 1);
    for i in 1..values.len() {
        let change = values[i] - values[i - 1];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    if gains.len() < period {
        return out;
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
    out[period] = rsi_value(avg_gain, avg_loss);

    for i in period + 1..values.len() {
        let change_idx = i - 1;
        avg_gain = (avg_gain * (period - 1) as f64 + gains[change_idx]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[change_idx]) / period as f64;
        out[i] = rsi_value(avg_gain, avg_loss);
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_warmup_period() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + (i % 5) as f64).collect();
        let out = rsi(&values, 14);
        for v in &out[..14] {
            assert!(v.is_nan());
        }
        assert!(out[14].is_finite());
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let values: Vec<f64> = (0..16).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&values, 14);
        assert!((out[15] - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let values: Vec<f64> = (0..16).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&values, 14);
        assert!(out[15].abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_flat_series_reports_100() {
        // avg_loss == 0 takes the saturated branch even with zero gains.
        let out = rsi(&[100.0; 20], 14);
        assert!((out[19] - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_bounded() {
        let values: Vec<f64> = (0..40)
            .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
            .collect();
        for v in rsi(&values, 14).iter().filter(|v| v.is_finite()) {
            assert!((0.0..=100.0).contains(v), "RSI {v} out of range");
        }
    }

    #[test]
    fn rsi_short_input() {
        let out = rsi(&[100.0], 14);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_nan());
    }

    #[test]
    fn rsi_mixed_moves_in_bullish_territory() {
        let values = [
            44.0, 44.25, 44.5, 43.75, 44.5, 44.25, 44.75, 45.25, 45.5, 45.25, 45.5, 46.0, 46.25,
            46.0, 46.5,
        ];
        let out = rsi(&values, 14);
        assert!(out[14] > 50.0 && out[14] < 100.0);
    }
}

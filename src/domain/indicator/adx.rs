//! ADX (Average Directional Index).
//!
//! +DM = up-move when it exceeds the down-move and is positive; -DM mirrored.
//! +DI/-DI = 100 × Wilder-smoothed DM / Wilder-smoothed TR.
//! DX = 100 × |+DI - -DI| / (+DI + -DI); ADX is the Wilder smoothing of DX.
//! Warmup: first (2n-1) values are unavailable. A zero true range leaves the
//! value unavailable (no direction to measure).

use crate::domain::indicator_helpers::wilder_smooth;

pub const DEFAULT_PERIOD: usize = 14;

pub fn adx(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    if period == 0 || n < 2 {
        return vec![f64::NAN; n];
    }

    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];
    let mut tr = vec![f64::NAN; n];
    for i in 1..n {
        let up_move = highs[i] - highs[i - 1];
        let down_move = lows[i - 1] - lows[i];
        plus_dm[i] = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        minus_dm[i] = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };
        let hl = highs[i] - lows[i];
        let hc = (highs[i] - closes[i - 1]).abs();
        let lc = (lows[i] - closes[i - 1]).abs();
        tr[i] = hl.max(hc).max(lc);
    }

    let smoothed_tr = wilder_smooth(&tr, period);
    let smoothed_plus = wilder_smooth(&plus_dm, period);
    let smoothed_minus = wilder_smooth(&minus_dm, period);

    let mut dx = vec![f64::NAN; n];
    for i in 0..n {
        if smoothed_tr[i].is_finite() && smoothed_tr[i] > 0.0 {
            let plus_di = 100.0 * smoothed_plus[i] / smoothed_tr[i];
            let minus_di = 100.0 * smoothed_minus[i] / smoothed_tr[i];
            let di_sum = plus_di + minus_di;
            if di_sum > 0.0 {
                dx[i] = 100.0 * (plus_di - minus_di).abs() / di_sum;
            }
        }
    }

    wilder_smooth(&dx, period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending_up(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + 2.0 * i as f64).collect();
        let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
        (highs, lows, closes)
    }

    #[test]
    fn adx_warmup() {
        let (h, l, c) = trending_up(40);
        let out = adx(&h, &l, &c, 14);
        assert!(out[26].is_nan());
        assert!(out[27].is_finite());
    }

    #[test]
    fn adx_strong_trend_reads_high() {
        let (h, l, c) = trending_up(60);
        let out = adx(&h, &l, &c, 14);
        // Every bar moves up: -DM is always 0, so DX is 100 throughout.
        assert!(out[59] > 90.0);
    }

    #[test]
    fn adx_bounded() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + ((i * 7) % 23) as f64 - 11.0)
            .collect();
        let highs: Vec<f64> = closes.iter().map(|c| c + 2.0).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 2.0).collect();
        let out = adx(&highs, &lows, &closes, 14);
        for v in out.iter().filter(|v| v.is_finite()) {
            assert!((0.0..=100.0).contains(v));
        }
    }

    #[test]
    fn adx_flat_series_is_unavailable() {
        let v = [100.0; 60];
        let out = adx(&v, &v, &v, 14);
        assert!(out.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn adx_short_input() {
        let out = adx(&[100.0], &[100.0], &[100.0], 14);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_nan());
    }
}

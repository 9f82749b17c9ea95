//! Candlestick pattern flags.
//!
//! Each flag is a signed value per bar: +1 bullish, -1 bearish, 0 absent.
//! Geometry terms: body = close - open, upper/lower = wick above/below the
//! body, range = high - low. Zero-range bars carry no pattern.
//!
//! - doji: body within 10% of the range
//! - hammer: lower wick at least twice the body, negligible upper wick
//! - shooting star: upper wick at least twice the body, negligible lower wick
//! - engulfing: opposite-color body that wraps the previous bar's body

#[derive(Debug, Clone, PartialEq)]
pub struct CandleFlags {
    pub doji: Vec<f64>,
    pub engulfing: Vec<f64>,
    pub hammer: Vec<f64>,
    pub shooting_star: Vec<f64>,
}

pub fn candle_flags(opens: &[f64], highs: &[f64], lows: &[f64], closes: &[f64]) -> CandleFlags {
    let n = closes.len();
    let mut flags = CandleFlags {
        doji: vec![0.0; n],
        engulfing: vec![0.0; n],
        hammer: vec![0.0; n],
        shooting_star: vec![0.0; n],
    };

    for i in 0..n {
        let range = highs[i] - lows[i];
        if range <= 0.0 {
            continue;
        }
        let body = closes[i] - opens[i];
        let upper = highs[i] - opens[i].max(closes[i]);
        let lower = opens[i].min(closes[i]) - lows[i];

        if body.abs() <= 0.1 * range {
            flags.doji[i] = 1.0;
        }
        if lower >= 2.0 * body.abs() && upper <= body.abs() {
            flags.hammer[i] = 1.0;
        }
        if upper >= 2.0 * body.abs() && lower <= body.abs() {
            flags.shooting_star[i] = -1.0;
        }

        if i > 0 {
            let prev_body = closes[i - 1] - opens[i - 1];
            let bullish = body > 0.0
                && prev_body < 0.0
                && opens[i] <= closes[i - 1]
                && closes[i] >= opens[i - 1]
                && body.abs() > prev_body.abs();
            let bearish = body < 0.0
                && prev_body > 0.0
                && opens[i] >= closes[i - 1]
                && closes[i] <= opens[i - 1]
                && body.abs() > prev_body.abs();
            if bullish {
                flags.engulfing[i] = 1.0;
            } else if bearish {
                flags.engulfing[i] = -1.0;
            }
        }
    }

    flags
}

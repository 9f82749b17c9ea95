//! Trend component: moving-average alignment, price position, ADX strength.

use serde::Serialize;

use crate::domain::frame::IndicatorFrame;
use crate::domain::indicator::{ADX14, SMA20, SMA200, SMA50};

pub const MIN_BARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendScore {
    /// `(alignment/2)*30 + (price_position/2)*30 + adx_tier*40`, divided by
    /// 100. Can dip below 0 in a fully inverted trend; the combiner clamps.
    pub score: f64,
    /// Sum of SMA20-vs-SMA50 and SMA50-vs-SMA200 comparisons (-1/0/+1 each).
    pub sma_alignment: i32,
    /// Sum of close-vs-SMA20 and close-vs-SMA200 comparisons (-1/0/+1 each).
    pub price_position: i32,
    /// 0 when ADX ≤ 20, 1 up to 30, 2 above.
    pub adx_tier: u8,
}

impl TrendScore {
    fn zero() -> Self {
        TrendScore {
            score: 0.0,
            sma_alignment: 0,
            price_position: 0,
            adx_tier: 0,
        }
    }
}

fn compare(left: Option<f64>, right: Option<f64>) -> i32 {
    match (left, right) {
        (Some(l), Some(r)) if l > r => 1,
        (Some(l), Some(r)) if l < r => -1,
        _ => 0,
    }
}

pub fn trend_score(frame: &IndicatorFrame) -> TrendScore {
    if frame.len() < MIN_BARS {
        return TrendScore::zero();
    }

    let close = frame.latest("close");
    let sma20 = frame.latest(SMA20);
    let sma50 = frame.latest(SMA50);
    let sma200 = frame.latest(SMA200);

    let sma_alignment = compare(sma20, sma50) + compare(sma50, sma200);
    let price_position = compare(close, sma20) + compare(close, sma200);

    let adx_tier = match frame.latest(ADX14) {
        Some(adx) if adx > 30.0 => 2,
        Some(adx) if adx > 20.0 => 1,
        _ => 0,
    };

    let score = (sma_alignment as f64 / 2.0) * 30.0
        + (price_position as f64 / 2.0) * 30.0
        + adx_tier as f64 * 40.0;

    TrendScore {
        score: score / 100.0,
        sma_alignment,
        price_position,
        adx_tier,
    }
}

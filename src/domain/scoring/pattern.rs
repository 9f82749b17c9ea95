//! Pattern component: recent candlestick pattern flags.

use serde::Serialize;

use crate::domain::frame::IndicatorFrame;
use crate::domain::indicator::{DOJI, ENGULFING, HAMMER, SHOOTING_STAR};

pub const MIN_BARS: usize = 5;
const LOOKBACK: usize = 3;

pub const PATTERN_COLUMNS: [&str; 4] = [DOJI, ENGULFING, HAMMER, SHOOTING_STAR];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternScore {
    /// 0.5 + sum(flags) / (2 × fired count), clamped to [0, 1]; 0.5 when no
    /// pattern fired in the lookback.
    pub score: f64,
    /// Fired patterns as "name:+1" / "name:-1", most recent bar first.
    pub patterns: Vec<String>,
}

pub fn pattern_score(frame: &IndicatorFrame) -> PatternScore {
    let neutral = PatternScore {
        score: 0.5,
        patterns: Vec::new(),
    };
    let n = frame.len();
    if n < MIN_BARS {
        return neutral;
    }

    let mut patterns = Vec::new();
    let mut value = 0.0;
    let mut count = 0usize;

    for offset in 1..=LOOKBACK.min(n) {
        let index = n - offset;
        for column in PATTERN_COLUMNS {
            if let Some(flag) = frame.value_at(column, index) {
                if flag != 0.0 {
                    patterns.push(format!("{column}:{flag:+}"));
                    value += flag;
                    count += 1;
                }
            }
        }
    }

    if count == 0 {
        return neutral;
    }

    let score = (0.5 + value / (count as f64 * 2.0)).clamp(0.0, 1.0);
    PatternScore { score, patterns }
}

//! Oscillator component: RSI and Stochastic readings.

use serde::Serialize;
use std::fmt;

use crate::domain::frame::IndicatorFrame;
use crate::domain::indicator::{RSI14, STOCH_D, STOCH_K};

pub const MIN_BARS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillatorSignal {
    Oversold,
    Overbought,
    Neutral,
}

impl fmt::Display for OscillatorSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscillatorSignal::Oversold => write!(f, "oversold"),
            OscillatorSignal::Overbought => write!(f, "overbought"),
            OscillatorSignal::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OscillatorScore {
    /// Mean of the RSI reading (oversold 0.8 / overbought 0.2 / neutral 0.5)
    /// and the Stochastic reading on the same scale.
    pub score: f64,
    pub rsi: Option<OscillatorSignal>,
    pub stochastic: Option<OscillatorSignal>,
}

pub fn oscillator_score(frame: &IndicatorFrame) -> OscillatorScore {
    let neutral = OscillatorScore {
        score: 0.5,
        rsi: None,
        stochastic: None,
    };
    if frame.len() < MIN_BARS || !frame.has_column(RSI14) {
        return neutral;
    }
    let Some(rsi) = frame.latest(RSI14) else {
        return neutral;
    };

    let (rsi_signal, rsi_score) = if rsi < 30.0 {
        (OscillatorSignal::Oversold, 0.8)
    } else if rsi > 70.0 {
        (OscillatorSignal::Overbought, 0.2)
    } else {
        (OscillatorSignal::Neutral, 0.5)
    };

    let (stoch_signal, stoch_score) = match (frame.latest(STOCH_K), frame.latest(STOCH_D)) {
        (Some(k), Some(d)) if k < 20.0 && d < 20.0 => (Some(OscillatorSignal::Oversold), 0.8),
        (Some(k), Some(d)) if k > 80.0 && d > 80.0 => (Some(OscillatorSignal::Overbought), 0.2),
        (Some(_), Some(_)) => (Some(OscillatorSignal::Neutral), 0.5),
        _ => (None, 0.5),
    };

    OscillatorScore {
        score: (rsi_score + stoch_score) / 2.0,
        rsi: Some(rsi_signal),
        stochastic: stoch_signal,
    }
}

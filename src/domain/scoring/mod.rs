//! Composite scoring engine.
//!
//! Six independent component scores over an indicator frame, combined into
//! one weighted 0-100 composite and a discrete buy/sell/neutral signal.
//! Each component tolerates missing indicator columns with a neutral
//! default; only a too-short series stops scoring entirely.

pub mod momentum;
pub mod oscillator;
pub mod pattern;
pub mod trend;
pub mod volatility;
pub mod volume;

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::error::AlphalabError;
use super::frame::IndicatorFrame;
use super::indicator::{MACD, MACD_SIGNAL, RSI14, SMA20, SMA200, SMA50};
use momentum::MomentumScore;
use oscillator::{OscillatorScore, OscillatorSignal};
use pattern::PatternScore;
use trend::TrendScore;
use volatility::VolatilityScore;
use volume::VolumeScore;

/// Bars of history required before scoring.
pub const MIN_BARS: usize = 60;

pub const WEIGHT_MOMENTUM: f64 = 0.25;
pub const WEIGHT_TREND: f64 = 0.30;
pub const WEIGHT_VOLATILITY: f64 = 0.10;
pub const WEIGHT_VOLUME: f64 = 0.10;
pub const WEIGHT_OSCILLATOR: f64 = 0.15;
pub const WEIGHT_PATTERN: f64 = 0.10;

pub const BUY_THRESHOLD: f64 = 70.0;
pub const SELL_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "buy"),
            Signal::Sell => write!(f, "sell"),
            Signal::Neutral => write!(f, "neutral"),
        }
    }
}

/// Signal from a composite score: buy above 70, sell below 30.
pub fn signal_for(overall_score: f64) -> Signal {
    if overall_score > BUY_THRESHOLD {
        Signal::Buy
    } else if overall_score < SELL_THRESHOLD {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

/// Normalized 0-1 contributions as fed to the weighted combiner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScores {
    pub momentum: f64,
    pub trend: f64,
    pub volatility: f64,
    pub volume: f64,
    pub oscillator: f64,
    pub pattern: f64,
}

/// Raw per-component detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponents {
    pub momentum: MomentumScore,
    pub trend: TrendScore,
    pub volatility: VolatilityScore,
    pub volume: VolumeScore,
    pub oscillator: OscillatorScore,
    pub pattern: PatternScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallScore {
    pub overall_score: f64,
    pub signal: Signal,
    pub component_scores: ComponentScores,
    pub components: ScoreComponents,
}

/// Compute the weighted composite. Fails softly upstream: the caller maps
/// an insufficient-data error into a zeroed report.
pub fn overall_score(frame: &IndicatorFrame) -> Result<OverallScore, AlphalabError> {
    if frame.len() < MIN_BARS {
        return Err(AlphalabError::InsufficientData {
            symbol: frame.symbol.clone(),
            bars: frame.len(),
            minimum: MIN_BARS,
        });
    }

    let momentum = momentum::momentum_score(frame);
    let trend = trend::trend_score(frame);
    let volatility = volatility::volatility_score(frame);
    let volume = volume::volume_score(frame, volume::DEFAULT_WINDOW);
    let oscillator = oscillator::oscillator_score(frame);
    let pattern = pattern::pattern_score(frame);

    // Momentum maps its ±10% range onto [0, 1]; everything else is clamped
    // into [0, 1] so the weighted sum stays inside [0, 100].
    let momentum_norm = match momentum.overall {
        Some(overall) => ((overall + 10.0) / 20.0).clamp(0.0, 1.0),
        None => 0.5,
    };
    let component_scores = ComponentScores {
        momentum: momentum_norm,
        trend: trend.score.clamp(0.0, 1.0),
        // Lower realized volatility is better.
        volatility: (1.0 - volatility.score).clamp(0.0, 1.0),
        volume: volume.score.clamp(0.0, 1.0),
        oscillator: oscillator.score.clamp(0.0, 1.0),
        pattern: pattern.score.clamp(0.0, 1.0),
    };

    let weighted = component_scores.momentum * WEIGHT_MOMENTUM
        + component_scores.trend * WEIGHT_TREND
        + component_scores.volatility * WEIGHT_VOLATILITY
        + component_scores.volume * WEIGHT_VOLUME
        + component_scores.oscillator * WEIGHT_OSCILLATOR
        + component_scores.pattern * WEIGHT_PATTERN;

    let overall = weighted * 100.0;

    Ok(OverallScore {
        overall_score: overall,
        signal: signal_for(overall),
        component_scores,
        components: ScoreComponents {
            momentum,
            trend,
            volatility,
            volume,
            oscillator,
            pattern,
        },
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Percent change against the previous close.
    pub daily_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSummary {
    pub rsi: Option<OscillatorSignal>,
    pub stochastic: Option<OscillatorSignal>,
    pub patterns: Vec<String>,
}

/// Per-symbol scoring report: the composite plus latest-bar context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub overall_score: f64,
    pub signal: Signal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_scores: Option<ComponentScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ScoreComponents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_levels: Option<KeyLevels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signals: Option<SignalSummary>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one symbol's frame into a full report. Below the minimum history
/// the report carries a zero score, a neutral signal, and an error note.
pub fn score(frame: &IndicatorFrame, symbol: &str) -> ScoreReport {
    let overall = match overall_score(frame) {
        Ok(overall) => overall,
        Err(_) => {
            return ScoreReport {
                symbol: symbol.to_string(),
                date: frame.last_date(),
                overall_score: 0.0,
                signal: Signal::Neutral,
                error: Some("insufficient data".to_string()),
                price: None,
                component_scores: None,
                components: None,
                key_levels: None,
                indicators: None,
                signals: None,
            };
        }
    };

    let n = frame.len();
    let price = match (
        frame.value_at("open", n - 1),
        frame.value_at("high", n - 1),
        frame.value_at("low", n - 1),
        frame.value_at("close", n - 1),
        frame.value_at("volume", n - 1),
    ) {
        (Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
            let prev_close = if n > 1 {
                frame.value_at("close", n - 2)
            } else {
                None
            };
            let daily_change = match prev_close {
                Some(prev) if prev > 0.0 => (close - prev) / prev * 100.0,
                _ => 0.0,
            };
            Some(PriceSnapshot {
                open,
                high,
                low,
                close,
                volume,
                daily_change,
            })
        }
        _ => None,
    };

    let key_levels = key_levels(frame);

    let indicators = IndicatorSnapshot {
        sma20: frame.latest(SMA20),
        sma50: frame.latest(SMA50),
        sma200: frame.latest(SMA200),
        rsi: frame.latest(RSI14),
        macd: frame.latest(MACD),
        macd_signal: frame.latest(MACD_SIGNAL),
    };

    let signals = SignalSummary {
        rsi: overall.components.oscillator.rsi,
        stochastic: overall.components.oscillator.stochastic,
        patterns: overall.components.pattern.patterns.clone(),
    };

    ScoreReport {
        symbol: symbol.to_string(),
        date: frame.last_date(),
        overall_score: overall.overall_score,
        signal: overall.signal,
        error: None,
        price,
        component_scores: Some(overall.component_scores),
        components: Some(overall.components),
        key_levels,
        indicators: Some(indicators),
        signals: Some(signals),
    }
}

/// Support from the 20-bar low and the long moving averages; resistance
/// from the 20-bar high.
fn key_levels(frame: &IndicatorFrame) -> Option<KeyLevels> {
    let lows = frame.column("low")?;
    let highs = frame.column("high")?;
    if lows.is_empty() {
        return None;
    }
    let window = 20.min(lows.len());
    let recent_low = lows[lows.len() - window..]
        .iter()
        .cloned()
        .fold(f64::MAX, f64::min);
    let recent_high = highs[highs.len() - window..]
        .iter()
        .cloned()
        .fold(f64::MIN, f64::max);

    let mut support = vec![round2(recent_low)];
    if let Some(sma50) = frame.latest(SMA50) {
        support.push(round2(sma50));
    }
    if let Some(sma200) = frame.latest(SMA200) {
        support.push(round2(sma200));
    }
    support.sort_by(f64::total_cmp);

    Some(KeyLevels {
        support,
        resistance: vec![round2(recent_high)],
    })
}

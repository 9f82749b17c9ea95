//! Technical indicator battery.
//!
//! [`compute_indicators`] extends a price series with every derived column
//! the scoring and strategy layers read. Each indicator is a pure function
//! in its own module; the trend/cross flags are derived here because they
//! depend on the moving-average columns existing first.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod candle;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod stochastic;

use super::error::AlphalabError;
use super::frame::IndicatorFrame;
use super::indicator_helpers::rolling_mean;
use super::ohlcv::{PriceSeries, REQUIRED_COLUMNS};

pub const SMA20: &str = "sma20";
pub const SMA50: &str = "sma50";
pub const SMA200: &str = "sma200";
pub const EMA9: &str = "ema9";
pub const EMA21: &str = "ema21";
pub const RSI14: &str = "rsi14";
pub const MACD: &str = "macd";
pub const MACD_SIGNAL: &str = "macd_signal";
pub const MACD_HIST: &str = "macd_hist";
pub const STOCH_K: &str = "stoch_k";
pub const STOCH_D: &str = "stoch_d";
pub const BB_LOWER: &str = "bb_lower";
pub const BB_MIDDLE: &str = "bb_middle";
pub const BB_UPPER: &str = "bb_upper";
pub const ATR14: &str = "atr14";
pub const VOLUME_SMA20: &str = "volume_sma20";
pub const VOLUME_RATIO: &str = "volume_ratio";
pub const ADX14: &str = "adx14";
pub const TREND_SMA: &str = "trend_sma";
pub const PRICE_VS_SMA200: &str = "price_vs_sma200";
pub const GOLDEN_CROSS: &str = "golden_cross";
pub const DEATH_CROSS: &str = "death_cross";
pub const DOJI: &str = "doji";
pub const ENGULFING: &str = "engulfing";
pub const HAMMER: &str = "hammer";
pub const SHOOTING_STAR: &str = "shooting_star";

/// Every column the battery derives, in insertion order.
pub const DERIVED_COLUMNS: [&str; 26] = [
    SMA20,
    SMA50,
    SMA200,
    EMA9,
    EMA21,
    RSI14,
    MACD,
    MACD_SIGNAL,
    MACD_HIST,
    STOCH_K,
    STOCH_D,
    BB_LOWER,
    BB_MIDDLE,
    BB_UPPER,
    ATR14,
    VOLUME_SMA20,
    VOLUME_RATIO,
    ADX14,
    TREND_SMA,
    PRICE_VS_SMA200,
    GOLDEN_CROSS,
    DEATH_CROSS,
    DOJI,
    ENGULFING,
    HAMMER,
    SHOOTING_STAR,
];

/// Compute the full battery over a price series.
///
/// Fails when any of the five OHLCV columns is absent. After all columns are
/// derived, every remaining unavailable cell (warmup NaN, division blowup)
/// is filled with 0. This lossy normalization applies to derived columns
/// only, never to the raw price data.
pub fn compute_indicators(series: &PriceSeries) -> Result<IndicatorFrame, AlphalabError> {
    for name in REQUIRED_COLUMNS {
        series.require(name)?;
    }
    let opens = series.require("open")?;
    let highs = series.require("high")?;
    let lows = series.require("low")?;
    let closes = series.require("close")?;
    let volumes = series.require("volume")?;

    let mut frame = IndicatorFrame::from_series(series);

    let sma20 = rolling_mean(closes, 20);
    let sma50 = rolling_mean(closes, 50);
    let sma200 = rolling_mean(closes, 200);
    frame.insert(SMA20, sma20.clone())?;
    frame.insert(SMA50, sma50.clone())?;
    frame.insert(SMA200, sma200.clone())?;

    frame.insert(EMA9, ema::ema(closes, 9))?;
    frame.insert(EMA21, ema::ema(closes, 21))?;

    frame.insert(RSI14, rsi::rsi(closes, 14))?;

    let macd_out = macd::macd_default(closes);
    frame.insert(MACD, macd_out.line)?;
    frame.insert(MACD_SIGNAL, macd_out.signal)?;
    frame.insert(MACD_HIST, macd_out.histogram)?;

    let (stoch_k, stoch_d) = stochastic::stochastic_default(highs, lows, closes);
    frame.insert(STOCH_K, stoch_k)?;
    frame.insert(STOCH_D, stoch_d)?;

    let bands = bollinger::bollinger_default(closes);
    frame.insert(BB_LOWER, bands.lower)?;
    frame.insert(BB_MIDDLE, bands.middle)?;
    frame.insert(BB_UPPER, bands.upper)?;

    frame.insert(ATR14, atr::atr(highs, lows, closes, atr::DEFAULT_PERIOD))?;

    let volume_sma = rolling_mean(volumes, 20);
    let volume_ratio: Vec<f64> = volumes
        .iter()
        .zip(volume_sma.iter())
        .map(|(v, s)| v / s)
        .collect();
    frame.insert(VOLUME_SMA20, volume_sma)?;
    frame.insert(VOLUME_RATIO, volume_ratio)?;

    frame.insert(ADX14, adx::adx(highs, lows, closes, adx::DEFAULT_PERIOD))?;

    // Trend flags come after their source averages. Comparisons against an
    // unavailable average are false, so warmup bars read 0 (or -1 for the
    // two-way price-vs-SMA200 flag).
    let trend_sma: Vec<f64> = sma20
        .iter()
        .zip(sma50.iter())
        .map(|(a, b)| {
            if a > b {
                1.0
            } else if a < b {
                -1.0
            } else {
                0.0
            }
        })
        .collect();
    frame.insert(TREND_SMA, trend_sma)?;

    let price_vs_sma200: Vec<f64> = closes
        .iter()
        .zip(sma200.iter())
        .map(|(c, s)| if c > s { 1.0 } else { -1.0 })
        .collect();
    frame.insert(PRICE_VS_SMA200, price_vs_sma200)?;

    let n = closes.len();
    let mut golden = vec![0.0; n];
    let mut death = vec![0.0; n];
    for i in 1..n {
        if sma50[i] > sma200[i] && sma50[i - 1] <= sma200[i - 1] {
            golden[i] = 1.0;
        }
        if sma50[i] < sma200[i] && sma50[i - 1] >= sma200[i - 1] {
            death[i] = 1.0;
        }
    }
    frame.insert(GOLDEN_CROSS, golden)?;
    frame.insert(DEATH_CROSS, death)?;

    let candles = candle::candle_flags(opens, highs, lows, closes);
    frame.insert(DOJI, candles.doji)?;
    frame.insert(ENGULFING, candles.engulfing)?;
    frame.insert(HAMMER, candles.hammer)?;
    frame.insert(SHOOTING_STAR, candles.shooting_star)?;

    for name in DERIVED_COLUMNS {
        frame.fill_unavailable(name);
    }

    Ok(frame)
}

//! Volume component: recent participation against the baseline.

use serde::Serialize;

use crate::domain::frame::IndicatorFrame;
use crate::domain::metrics::mean;

pub const DEFAULT_WINDOW: usize = 20;
const RECENT_BARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeScore {
    /// min(ratio / 2, 1): double the baseline volume saturates at 1.
    pub score: f64,
    /// 5-bar average volume over the window average.
    pub ratio: Option<f64>,
}

pub fn volume_score(frame: &IndicatorFrame, window: usize) -> VolumeScore {
    let none = VolumeScore {
        score: 0.0,
        ratio: None,
    };
    let Some(volumes) = frame.column("volume") else {
        return none;
    };
    if window == 0 || volumes.len() < window {
        return none;
    }

    let recent = mean(&volumes[volumes.len() - RECENT_BARS.min(volumes.len())..]);
    let baseline = mean(&volumes[volumes.len() - window..]);
    if baseline <= 0.0 {
        return none;
    }

    let ratio = recent / baseline;
    VolumeScore {
        score: (ratio / 2.0).min(1.0),
        ratio: Some(ratio),
    }
}

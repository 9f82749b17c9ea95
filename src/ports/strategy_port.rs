//! Strategy generation port trait.
//!
//! The production collaborator behind this seam is an LLM prompted with
//! few-shot strategy examples; the core only sees the resulting named
//! entry/exit signal pairs, so tests and offline runs inject deterministic
//! implementations.

use crate::domain::error::AlphalabError;
use crate::domain::frame::IndicatorFrame;
use crate::domain::signal::StrategySignal;

pub trait StrategyPort {
    fn generate(
        &self,
        symbol: &str,
        frame: &IndicatorFrame,
    ) -> Result<Vec<StrategySignal>, AlphalabError>;
}

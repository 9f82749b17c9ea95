//! Strategy entry/exit signals.

use serde::{Deserialize, Serialize};

use super::error::AlphalabError;

/// Named pair of boolean entry/exit sequences, aligned 1:1 with the bars of
/// the price series the strategy targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySignal {
    pub name: String,
    pub entries: Vec<bool>,
    pub exits: Vec<bool>,
}

impl StrategySignal {
    pub fn new(name: &str, entries: Vec<bool>, exits: Vec<bool>) -> Self {
        StrategySignal {
            name: name.to_string(),
            entries,
            exits,
        }
    }

    /// Check that both sequences match the price series length.
    pub fn validate(&self, bars: usize) -> Result<(), AlphalabError> {
        if self.entries.len() != bars {
            return Err(AlphalabError::SignalMismatch {
                name: self.name.clone(),
                signals: self.entries.len(),
                bars,
            });
        }
        if self.exits.len() != bars {
            return Err(AlphalabError::SignalMismatch {
                name: self.name.clone(),
                signals: self.exits.len(),
                bars,
            });
        }
        Ok(())
    }
}

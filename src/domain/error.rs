//! Domain error types.

/// Top-level error type for alphalab.
#[derive(Debug, thiserror::Error)]
pub enum AlphalabError {
    #[error("price series missing required column: {column}")]
    MissingColumn { column: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol} on {exchange}")]
    NoData { symbol: String, exchange: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("strategy {name}: signal length {signals} does not match {bars} price bars")]
    SignalMismatch {
        name: String,
        signals: usize,
        bars: usize,
    },

    #[error("strategy {name}: {reason}")]
    Simulation { name: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AlphalabError> for std::process::ExitCode {
    fn from(err: &AlphalabError) -> Self {
        let code: u8 = match err {
            AlphalabError::Io(_) => 1,
            AlphalabError::ConfigParse { .. }
            | AlphalabError::ConfigMissing { .. }
            | AlphalabError::ConfigInvalid { .. } => 2,
            AlphalabError::Data { .. } | AlphalabError::NoData { .. } => 3,
            AlphalabError::MissingColumn { .. } => 4,
            AlphalabError::InsufficientData { .. } => 5,
            AlphalabError::SignalMismatch { .. } | AlphalabError::Simulation { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_message() {
        let err = AlphalabError::MissingColumn {
            column: "close".into(),
        };
        assert_eq!(
            err.to_string(),
            "price series missing required column: close"
        );
    }

    #[test]
    fn signal_mismatch_message() {
        let err = AlphalabError::SignalMismatch {
            name: "EMA Crossover".into(),
            signals: 90,
            bars: 100,
        };
        assert!(err.to_string().contains("EMA Crossover"));
        assert!(err.to_string().contains("90"));
        assert!(err.to_string().contains("100"));
    }
}

//! Backtest configuration loading and validation.

use super::backtest::BacktestConfig;
use super::error::AlphalabError;
use crate::ports::config_port::ConfigPort;

/// Build a [`BacktestConfig`] from the `[backtest]` section, falling back to
/// defaults for absent keys, and reject out-of-range values before any
/// computation runs.
pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, AlphalabError> {
    let defaults = BacktestConfig::default();
    let built = BacktestConfig {
        initial_capital: config.get_float("backtest", "initial_capital", defaults.initial_capital),
        fee_rate: config.get_float("backtest", "fee_rate", defaults.fee_rate),
        slippage_rate: config.get_float("backtest", "slippage_rate", defaults.slippage_rate),
        risk_free_rate: config.get_float("backtest", "risk_free_rate", defaults.risk_free_rate),
    };
    validate_backtest_config(&built)?;
    Ok(built)
}

pub fn validate_backtest_config(config: &BacktestConfig) -> Result<(), AlphalabError> {
    if !(config.initial_capital > 0.0) {
        return Err(invalid(
            "initial_capital",
            "must be positive",
        ));
    }
    if !(0.0..1.0).contains(&config.fee_rate) {
        return Err(invalid("fee_rate", "must be in [0, 1)"));
    }
    if !(0.0..1.0).contains(&config.slippage_rate) {
        return Err(invalid("slippage_rate", "must be in [0, 1)"));
    }
    if !(config.risk_free_rate >= 0.0) {
        return Err(invalid("risk_free_rate", "must be non-negative"));
    }
    Ok(())
}

fn invalid(key: &str, reason: &str) -> AlphalabError {
    AlphalabError::ConfigInvalid {
        section: "backtest".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn defaults_when_section_absent() {
        let adapter = FileConfigAdapter::from_string("[other]\nkey = 1\n").unwrap();
        let config = build_backtest_config(&adapter).unwrap();
        assert_eq!(config, BacktestConfig::default());
    }

    #[test]
    fn reads_backtest_section() {
        let ini = r#"
[backtest]
initial_capital = 50000
fee_rate = 0.002
slippage_rate = 0.0005
risk_free_rate = 0.05
"#;
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let config = build_backtest_config(&adapter).unwrap();
        assert!((config.initial_capital - 50_000.0).abs() < f64::EPSILON);
        assert!((config.fee_rate - 0.002).abs() < f64::EPSILON);
        assert!((config.slippage_rate - 0.0005).abs() < f64::EPSILON);
        assert!((config.risk_free_rate - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_positive_capital() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\ninitial_capital = 0\n").unwrap();
        let err = build_backtest_config(&adapter).unwrap_err();
        assert!(
            matches!(err, AlphalabError::ConfigInvalid { key, .. } if key == "initial_capital")
        );
    }

    #[test]
    fn rejects_fee_rate_of_one_or_more() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nfee_rate = 1.0\n").unwrap();
        assert!(build_backtest_config(&adapter).is_err());
    }

    #[test]
    fn rejects_negative_slippage() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\nslippage_rate = -0.001\n").unwrap();
        assert!(build_backtest_config(&adapter).is_err());
    }
}

//! Backtest engine: per-strategy simulation with a buy-and-hold benchmark.
//!
//! Each strategy is simulated in isolation; a failure is recorded as that
//! strategy's `{error}` entry and never disturbs its siblings or the
//! benchmark.

use serde::Serialize;
use std::collections::BTreeMap;

use super::execution::{simulate_buy_hold, simulate_signals};
use super::metrics::{benchmark_relative, MetricsBundle};
use super::ohlcv::PriceSeries;
use super::signal::StrategySignal;

pub const BENCHMARK_NAME: &str = "benchmark";

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    /// Fee per trade as a fraction of the traded notional.
    pub fee_rate: f64,
    /// Slippage per trade as a fraction of the traded notional.
    pub slippage_rate: f64,
    pub risk_free_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 100_000.0,
            fee_rate: 0.001,
            slippage_rate: 0.001,
            risk_free_rate: 0.0,
        }
    }
}

/// One strategy's result: a metrics bundle, or the error that stopped it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StrategyOutcome {
    Metrics(Box<MetricsBundle>),
    Failed { error: String },
}

impl StrategyOutcome {
    pub fn metrics(&self) -> Option<&MetricsBundle> {
        match self {
            StrategyOutcome::Metrics(bundle) => Some(bundle),
            StrategyOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StrategyOutcome::Metrics(_) => None,
            StrategyOutcome::Failed { error } => Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub period: String,
    pub results: BTreeMap<String, StrategyOutcome>,
}

/// Simulate every strategy against the series plus the benchmark entry.
pub fn run_backtest(
    series: &PriceSeries,
    signals: &[StrategySignal],
    config: &BacktestConfig,
) -> BacktestReport {
    let period = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => "empty".to_string(),
    };

    let benchmark = simulate_buy_hold(series, config).map(|portfolio| {
        let bundle = MetricsBundle::compute(BENCHMARK_NAME, &portfolio, config.risk_free_rate);
        let returns = portfolio.daily_returns();
        (bundle, returns)
    });

    let mut results = BTreeMap::new();

    for signal in signals {
        let outcome = match simulate_signals(series, signal, config) {
            Ok(portfolio) => {
                let mut bundle =
                    MetricsBundle::compute(&signal.name, &portfolio, config.risk_free_rate);
                if let Ok((benchmark_bundle, benchmark_returns)) = &benchmark {
                    bundle.vs_benchmark = Some(benchmark_relative(
                        &bundle,
                        &portfolio.daily_returns(),
                        benchmark_bundle,
                        benchmark_returns,
                    ));
                }
                StrategyOutcome::Metrics(Box::new(bundle))
            }
            Err(err) => StrategyOutcome::Failed {
                error: err.to_string(),
            },
        };
        results.insert(signal.name.clone(), outcome);
    }

    let benchmark_outcome = match benchmark {
        Ok((bundle, _)) => StrategyOutcome::Metrics(Box::new(bundle)),
        Err(err) => StrategyOutcome::Failed {
            error: err.to_string(),
        },
    };
    results.insert(BENCHMARK_NAME.to_string(), benchmark_outcome);

    BacktestReport {
        symbol: series.symbol.clone(),
        period,
        results,
    }
}

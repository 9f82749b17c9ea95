//! Strategy ranking over backtest results.

use serde::Serialize;
use std::str::FromStr;

use super::backtest::BacktestReport;
use super::metrics::MetricsBundle;

/// Risk-adjusted metric to order strategies by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankKey {
    #[default]
    Sharpe,
    Sortino,
    Calmar,
    TotalReturn,
    Cagr,
}

impl RankKey {
    pub fn value(&self, bundle: &MetricsBundle) -> f64 {
        match self {
            RankKey::Sharpe => bundle.sharpe_ratio,
            RankKey::Sortino => bundle.sortino_ratio,
            RankKey::Calmar => bundle.calmar_ratio,
            RankKey::TotalReturn => bundle.total_return,
            RankKey::Cagr => bundle.cagr,
        }
    }
}

impl FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sharpe" => Ok(RankKey::Sharpe),
            "sortino" => Ok(RankKey::Sortino),
            "calmar" => Ok(RankKey::Calmar),
            "total-return" => Ok(RankKey::TotalReturn),
            "cagr" => Ok(RankKey::Cagr),
            other => Err(format!("unknown ranking key: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStrategy {
    pub rank: usize,
    pub name: String,
    pub key_value: f64,
    pub total_return: f64,
}

/// Order successful results (benchmark included) by the ranking key,
/// descending, ties broken by total return. Failed strategies are excluded.
pub fn rank(report: &BacktestReport, key: RankKey) -> Vec<RankedStrategy> {
    let mut ranked: Vec<RankedStrategy> = report
        .results
        .iter()
        .filter_map(|(name, outcome)| outcome.metrics().map(|bundle| (name, bundle)))
        .map(|(name, bundle)| RankedStrategy {
            rank: 0,
            name: name.clone(),
            key_value: key.value(bundle),
            total_return: bundle.total_return,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.key_value
            .total_cmp(&a.key_value)
            .then(b.total_return.total_cmp(&a.total_return))
    });
    for (i, entry) in ranked.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    ranked
}

//! Combined per-symbol analysis output: the stable contract report
//! renderers consume.

use serde::Serialize;

use super::backtest::BacktestReport;
use super::rank::RankedStrategy;
use super::scoring::ScoreReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub score: ScoreReport,
    pub backtest: BacktestReport,
    pub ranking: Vec<RankedStrategy>,
}

impl AnalysisReport {
    /// Top strategy names by rank, for the shortlist views.
    pub fn top_names(&self, n: usize) -> Vec<String> {
        self.ranking.iter().take(n).map(|r| r.name.clone()).collect()
    }
}

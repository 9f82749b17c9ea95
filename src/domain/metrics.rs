//! Performance metrics and statistics.
//!
//! [`MetricsBundle::compute`] turns a simulated portfolio into the full
//! standardized bundle. Statistical degeneracies (empty return series, zero
//! trades, zero variance) resolve to documented defaults instead of errors,
//! so every strategy produces a comparably shaped record.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use super::portfolio::{EquityPoint, Portfolio};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsBundle {
    pub strategy: String,
    pub total_return: f64,
    pub cagr: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub max_drawdown: f64,
    pub avg_drawdown: f64,
    pub volatility: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub trades: TradeStats,
    pub drawdowns: DrawdownStats,
    pub return_stats: ReturnStats,
    pub risk_metrics: RiskMetrics,
    pub period_returns: PeriodReturns,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs_benchmark: Option<BenchmarkRelative>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub avg_win: f64,
    /// Mean P&L of losing trades (signed, ≤ 0).
    pub avg_loss: f64,
    /// Mean holding time in bars.
    pub avg_duration: f64,
    pub max_trade_profit: f64,
    pub max_trade_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawdownStats {
    pub max_drawdown: f64,
    /// Longest run of bars below the running equity peak.
    pub max_drawdown_duration: usize,
    pub avg_drawdown_duration: f64,
    pub recovery_factor: f64,
    pub ulcer_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStats {
    pub best_day: f64,
    pub worst_day: f64,
    pub avg_up_day: f64,
    pub avg_down_day: f64,
    pub up_days: usize,
    pub down_days: usize,
    pub up_day_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetrics {
    pub var_95: f64,
    pub cvar_95: f64,
    pub omega_ratio: f64,
    pub tail_ratio: f64,
    pub skew: f64,
    pub kurtosis: f64,
}

/// Trailing returns anchored to the last date of the series (not wall
/// clock). A window whose start predates the data resolves to 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReturns {
    pub mtd: f64,
    pub qtd: f64,
    pub ytd: f64,
    #[serde(rename = "1m")]
    pub one_month: f64,
    #[serde(rename = "3m")]
    pub three_months: f64,
    #[serde(rename = "6m")]
    pub six_months: f64,
    #[serde(rename = "1y")]
    pub one_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRelative {
    pub excess_return: f64,
    pub alpha: f64,
    pub beta: f64,
    pub information_ratio: f64,
}

impl MetricsBundle {
    pub fn compute(name: &str, portfolio: &Portfolio, risk_free_rate: f64) -> Self {
        let equity_curve = &portfolio.equity_curve;
        let returns = portfolio.daily_returns();
        let trades = &portfolio.closed_trades;

        let total_return = if portfolio.initial_capital > 0.0 {
            (portfolio.final_equity() - portfolio.initial_capital) / portfolio.initial_capital
        } else {
            0.0
        };

        let years = equity_curve.len() as f64 / TRADING_DAYS_PER_YEAR;
        let cagr = if years > 0.0 && total_return.is_finite() && total_return > -1.0 {
            (1.0 + total_return).powf(1.0 / years) - 1.0
        } else if years > 0.0 && total_return <= -1.0 {
            -1.0
        } else {
            0.0
        };

        let daily_rf = risk_free_rate / TRADING_DAYS_PER_YEAR;
        let (sharpe_ratio, sortino_ratio) = sharpe_sortino(&returns, daily_rf);
        let volatility = population_std(&returns) * TRADING_DAYS_PER_YEAR.sqrt();

        let dd_series = drawdown_series(equity_curve);
        let max_drawdown = dd_series.iter().cloned().fold(0.0, f64::max);
        let avg_drawdown = mean(&dd_series);
        let (max_dd_duration, avg_dd_duration) = drawdown_durations(equity_curve);

        let calmar_ratio = if max_drawdown > 0.0 {
            cagr / max_drawdown
        } else {
            0.0
        };
        let recovery_factor = if max_drawdown > 0.0 {
            total_return / max_drawdown
        } else {
            0.0
        };

        let mut win_count = 0usize;
        let mut loss_count = 0usize;
        let mut gross_profit = 0.0_f64;
        let mut gross_loss = 0.0_f64;
        let mut total_bars_held = 0usize;
        let mut max_trade_profit = f64::MIN;
        let mut max_trade_loss = f64::MAX;
        for trade in trades {
            if trade.pnl > 0.0 {
                win_count += 1;
                gross_profit += trade.pnl;
            } else if trade.pnl < 0.0 {
                loss_count += 1;
                gross_loss += trade.pnl.abs();
            }
            total_bars_held += trade.bars_held;
            max_trade_profit = max_trade_profit.max(trade.pnl);
            max_trade_loss = max_trade_loss.min(trade.pnl);
        }
        let total_trades = trades.len();

        let win_rate = if total_trades > 0 {
            win_count as f64 / total_trades as f64
        } else {
            0.0
        };
        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let trade_stats = TradeStats {
            total_trades,
            win_count,
            loss_count,
            avg_win: if win_count > 0 {
                gross_profit / win_count as f64
            } else {
                0.0
            },
            avg_loss: if loss_count > 0 {
                -gross_loss / loss_count as f64
            } else {
                0.0
            },
            avg_duration: if total_trades > 0 {
                total_bars_held as f64 / total_trades as f64
            } else {
                0.0
            },
            max_trade_profit: if total_trades > 0 {
                max_trade_profit
            } else {
                0.0
            },
            max_trade_loss: if total_trades > 0 { max_trade_loss } else { 0.0 },
        };

        MetricsBundle {
            strategy: name.to_string(),
            total_return,
            cagr,
            sharpe_ratio,
            sortino_ratio,
            calmar_ratio,
            max_drawdown,
            avg_drawdown,
            volatility,
            win_rate,
            profit_factor,
            trades: trade_stats,
            drawdowns: DrawdownStats {
                max_drawdown,
                max_drawdown_duration: max_dd_duration,
                avg_drawdown_duration: avg_dd_duration,
                recovery_factor,
                ulcer_index: ulcer_index(&dd_series),
            },
            return_stats: return_stats(&returns),
            risk_metrics: RiskMetrics {
                var_95: var_95(&returns),
                cvar_95: cvar_95(&returns),
                omega_ratio: omega_ratio(&returns),
                tail_ratio: tail_ratio(&returns),
                skew: skewness(&returns),
                kurtosis: excess_kurtosis(&returns),
            },
            period_returns: PeriodReturns::compute(equity_curve),
            vs_benchmark: None,
        }
    }
}

impl PeriodReturns {
    /// Anchor every window to the final equity date.
    pub fn compute(equity_curve: &[EquityPoint]) -> Self {
        let zero = PeriodReturns {
            mtd: 0.0,
            qtd: 0.0,
            ytd: 0.0,
            one_month: 0.0,
            three_months: 0.0,
            six_months: 0.0,
            one_year: 0.0,
        };
        let Some(last) = equity_curve.last() else {
            return zero;
        };
        let anchor = last.date;

        let quarter_month = 3 * ((anchor.month0()) / 3) + 1;
        let mtd_start = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1);
        let qtd_start = NaiveDate::from_ymd_opt(anchor.year(), quarter_month, 1);
        let ytd_start = NaiveDate::from_ymd_opt(anchor.year(), 1, 1);

        PeriodReturns {
            mtd: period_return(equity_curve, mtd_start),
            qtd: period_return(equity_curve, qtd_start),
            ytd: period_return(equity_curve, ytd_start),
            one_month: period_return(equity_curve, anchor.checked_sub_months(Months::new(1))),
            three_months: period_return(equity_curve, anchor.checked_sub_months(Months::new(3))),
            six_months: period_return(equity_curve, anchor.checked_sub_months(Months::new(6))),
            one_year: period_return(equity_curve, anchor.checked_sub_months(Months::new(12))),
        }
    }
}

/// Return from the first equity point at or after `start` through the last
/// point. 0 when the start is unresolvable or predates the data.
fn period_return(equity_curve: &[EquityPoint], start: Option<NaiveDate>) -> f64 {
    let Some(start) = start else { return 0.0 };
    let Some(first) = equity_curve.first() else {
        return 0.0;
    };
    if start < first.date {
        return 0.0;
    }
    let base = equity_curve.iter().find(|p| p.date >= start);
    match (base, equity_curve.last()) {
        (Some(base), Some(last)) if base.equity > 0.0 => last.equity / base.equity - 1.0,
        _ => 0.0,
    }
}

/// Relative statistics of a strategy against the benchmark, from their
/// metrics bundles and aligned daily-return series.
pub fn benchmark_relative(
    strategy: &MetricsBundle,
    strategy_returns: &[f64],
    benchmark: &MetricsBundle,
    benchmark_returns: &[f64],
) -> BenchmarkRelative {
    BenchmarkRelative {
        excess_return: strategy.total_return - benchmark.total_return,
        alpha: strategy.cagr - benchmark.cagr,
        beta: beta(strategy_returns, benchmark_returns),
        information_ratio: information_ratio(strategy_returns, benchmark_returns),
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn sharpe_sortino(returns: &[f64], daily_rf: f64) -> (f64, f64) {
    if returns.is_empty() {
        return (0.0, 0.0);
    }
    let n = returns.len() as f64;
    let excess = mean(returns) - daily_rf;
    let stddev = population_std(returns);

    let sharpe = if stddev > 0.0 {
        (excess / stddev) * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    };

    let downside_sq: f64 = returns
        .iter()
        .filter(|&&r| r < daily_rf)
        .map(|&r| (r - daily_rf) * (r - daily_rf))
        .sum();
    let downside_std = (downside_sq / n).sqrt();
    let sortino = if downside_std > 0.0 {
        (excess / downside_std) * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    };

    (sharpe, sortino)
}

/// Fractional peak-to-trough decline per bar, ≥ 0.
pub fn drawdown_series(equity_curve: &[EquityPoint]) -> Vec<f64> {
    let mut out = Vec::with_capacity(equity_curve.len());
    let mut peak = f64::MIN;
    for point in equity_curve {
        peak = peak.max(point.equity);
        if peak > 0.0 {
            out.push((peak - point.equity) / peak);
        } else {
            out.push(0.0);
        }
    }
    out
}

/// (longest, average) length in bars of runs below the running peak. The
/// average includes a still-open trailing episode.
fn drawdown_durations(equity_curve: &[EquityPoint]) -> (usize, f64) {
    let mut episodes: Vec<usize> = Vec::new();
    let mut peak = f64::MIN;
    let mut current = 0usize;
    for point in equity_curve {
        if point.equity >= peak {
            peak = point.equity;
            if current > 0 {
                episodes.push(current);
                current = 0;
            }
        } else {
            current += 1;
        }
    }
    if current > 0 {
        episodes.push(current);
    }
    let max = episodes.iter().copied().max().unwrap_or(0);
    let avg = if episodes.is_empty() {
        0.0
    } else {
        episodes.iter().sum::<usize>() as f64 / episodes.len() as f64
    };
    (max, avg)
}

/// Root-mean-square of the drawdown series.
pub fn ulcer_index(drawdowns: &[f64]) -> f64 {
    if drawdowns.is_empty() {
        return 0.0;
    }
    (drawdowns.iter().map(|d| d * d).sum::<f64>() / drawdowns.len() as f64).sqrt()
}

fn return_stats(returns: &[f64]) -> ReturnStats {
    let up: Vec<f64> = returns.iter().copied().filter(|r| *r > 0.0).collect();
    let down: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    ReturnStats {
        best_day: if returns.is_empty() {
            0.0
        } else {
            returns.iter().cloned().fold(f64::MIN, f64::max)
        },
        worst_day: if returns.is_empty() {
            0.0
        } else {
            returns.iter().cloned().fold(f64::MAX, f64::min)
        },
        avg_up_day: mean(&up),
        avg_down_day: mean(&down),
        up_days: up.len(),
        down_days: down.len(),
        up_day_ratio: if returns.is_empty() {
            0.0
        } else {
            up.len() as f64 / returns.len() as f64
        },
    }
}

/// Percentile with linear interpolation between order statistics.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] + weight * (sorted[upper] - sorted[lower])
    }
}

/// Value at Risk at 95% confidence: |5th percentile| of daily returns.
pub fn var_95(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    percentile(returns, 5.0).abs()
}

/// Conditional VaR: mean of the tail at or below -VaR, falling back to VaR
/// when the tail is empty.
pub fn cvar_95(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let var = var_95(returns);
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= -var).collect();
    if tail.is_empty() {
        var
    } else {
        mean(&tail).abs()
    }
}

/// Gains over losses around a zero threshold. +∞ when gains exist with no
/// losses, 0 when neither side exists.
pub fn omega_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let above: f64 = returns.iter().filter(|r| **r > 0.0).sum();
    let below: f64 = returns.iter().filter(|r| **r <= 0.0).sum();
    if below.abs() < 1e-10 {
        if above > 0.0 { f64::INFINITY } else { 0.0 }
    } else {
        above / below.abs()
    }
}

/// |95th / 5th percentile|, 0 when the 5th percentile is exactly 0.
pub fn tail_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let p5 = percentile(returns, 5.0);
    if p5 == 0.0 {
        0.0
    } else {
        (percentile(returns, 95.0) / p5).abs()
    }
}

/// Bias-corrected sample skewness (Fisher-Pearson G1). 0 below 3 samples or
/// on zero variance.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let m = mean(values);
    let nf = n as f64;
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / nf;
    if m2 <= 0.0 {
        return 0.0;
    }
    let g1 = m3 / m2.powf(1.5);
    (nf * (nf - 1.0)).sqrt() / (nf - 2.0) * g1
}

/// Bias-corrected sample excess kurtosis (G2). 0 below 4 samples or on zero
/// variance.
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let m = mean(values);
    let nf = n as f64;
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / nf;
    let m4 = values.iter().map(|v| (v - m).powi(4)).sum::<f64>() / nf;
    if m2 <= 0.0 {
        return 0.0;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    ((nf + 1.0) * g2 + 6.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0))
}

/// Sample covariance over sample variance of the benchmark. 0 on length
/// mismatch or zero benchmark variance.
pub fn beta(strategy_returns: &[f64], benchmark_returns: &[f64]) -> f64 {
    let n = strategy_returns.len();
    if n != benchmark_returns.len() || n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean_s = mean(strategy_returns);
    let mean_b = mean(benchmark_returns);
    let cov = strategy_returns
        .iter()
        .zip(benchmark_returns.iter())
        .map(|(s, b)| (s - mean_s) * (b - mean_b))
        .sum::<f64>()
        / (nf - 1.0);
    let var_b = benchmark_returns
        .iter()
        .map(|b| (b - mean_b).powi(2))
        .sum::<f64>()
        / (nf - 1.0);
    if var_b == 0.0 { 0.0 } else { cov / var_b }
}

/// Annualized mean/stdev of the per-bar return differential. 0 on length
/// mismatch or a zero-variance differential.
pub fn information_ratio(strategy_returns: &[f64], benchmark_returns: &[f64]) -> f64 {
    let n = strategy_returns.len();
    if n != benchmark_returns.len() || n < 2 {
        return 0.0;
    }
    let diff: Vec<f64> = strategy_returns
        .iter()
        .zip(benchmark_returns.iter())
        .map(|(s, b)| s - b)
        .collect();
    let m = mean(&diff);
    let nf = n as f64;
    let sample_var = diff.iter().map(|d| (d - m).powi(2)).sum::<f64>() / (nf - 1.0);
    let std = sample_var.sqrt();
    if std == 0.0 {
        0.0
    } else {
        m / std * TRADING_DAYS_PER_YEAR.sqrt()
    }
}

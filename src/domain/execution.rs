//! Signal-driven fill simulation.
//!
//! Long/flat position flipping: an entry signal while flat invests all
//! available cash at the bar's close; an exit signal while holding
//! liquidates at the close. Fee and slippage are charged as fractions of
//! the traded notional on both sides. When a bar carries both signals while
//! flat, the entry wins and the new position is only closeable on a later
//! bar. Redundant signals (entry while open, exit while flat) are no-ops.

use super::backtest::BacktestConfig;
use super::error::AlphalabError;
use super::ohlcv::PriceSeries;
use super::portfolio::Portfolio;
use super::position::{ClosedTrade, Position};
use super::signal::StrategySignal;

/// Fee + slippage charge for a traded notional.
pub fn friction_cost(notional: f64, config: &BacktestConfig) -> f64 {
    notional * (config.fee_rate + config.slippage_rate)
}

/// Simulate one strategy's signals over a price series.
pub fn simulate_signals(
    series: &PriceSeries,
    signal: &StrategySignal,
    config: &BacktestConfig,
) -> Result<Portfolio, AlphalabError> {
    let closes = series.require("close")?;
    signal.validate(closes.len())?;

    let dates = series.dates();
    let mut portfolio = Portfolio::new(config.initial_capital);

    for i in 0..closes.len() {
        let price = closes[i];
        if !price.is_finite() || price <= 0.0 {
            return Err(AlphalabError::Simulation {
                name: signal.name.clone(),
                reason: format!("non-positive close {price} at bar {i}"),
            });
        }

        if portfolio.is_flat() {
            if signal.entries[i] {
                let notional = portfolio.cash;
                let cost = friction_cost(notional, config);
                let quantity = (notional - cost) / price;
                if quantity > 0.0 {
                    portfolio.cash = 0.0;
                    portfolio.open_position(Position {
                        quantity,
                        entry_price: price,
                        entry_date: dates[i],
                        entry_index: i,
                        entry_value: notional,
                    });
                }
            }
        } else if signal.exits[i] {
            if let Some(position) = portfolio.close_position() {
                let notional = position.market_value(price);
                let proceeds = notional - friction_cost(notional, config);
                portfolio.cash += proceeds;
                portfolio.record_trade(ClosedTrade {
                    quantity: position.quantity,
                    entry_price: position.entry_price,
                    exit_price: price,
                    entry_date: position.entry_date,
                    exit_date: dates[i],
                    bars_held: i - position.entry_index,
                    pnl: proceeds - position.entry_value,
                });
            }
        }

        let equity = match &portfolio.position {
            Some(position) => portfolio.cash + position.market_value(price),
            None => portfolio.cash,
        };
        portfolio.record_equity(dates[i], equity);
    }

    Ok(portfolio)
}

/// Buy on the first bar with all cash, hold to the end. Frictionless: the
/// benchmark measures the market, not an execution.
pub fn simulate_buy_hold(
    series: &PriceSeries,
    config: &BacktestConfig,
) -> Result<Portfolio, AlphalabError> {
    let closes = series.require("close")?;
    let dates = series.dates();
    let mut portfolio = Portfolio::new(config.initial_capital);

    for i in 0..closes.len() {
        let price = closes[i];
        if !price.is_finite() || price <= 0.0 {
            return Err(AlphalabError::Simulation {
                name: "benchmark".to_string(),
                reason: format!("non-positive close {price} at bar {i}"),
            });
        }
        if i == 0 {
            let quantity = portfolio.cash / price;
            portfolio.open_position(Position {
                quantity,
                entry_price: price,
                entry_date: dates[0],
                entry_index: 0,
                entry_value: portfolio.cash,
            });
            portfolio.cash = 0.0;
        }
        let equity = match &portfolio.position {
            Some(position) => portfolio.cash + position.market_value(price),
            None => portfolio.cash,
        };
        portfolio.record_equity(dates[i], equity);
    }

    Ok(portfolio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let bars: Vec<OhlcvBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect();
        PriceSeries::from_bars("TEST", "NSE", &bars).unwrap()
    }

    fn frictionless() -> BacktestConfig {
        BacktestConfig {
            fee_rate: 0.0,
            slippage_rate: 0.0,
            ..BacktestConfig::default()
        }
    }

    fn signal(name: &str, entries: &[bool], exits: &[bool]) -> StrategySignal {
        StrategySignal::new(name, entries.to_vec(), exits.to_vec())
    }

    #[test]
    fn round_trip_trade_frictionless() {
        let series = make_series(&[100.0, 110.0, 120.0, 115.0]);
        let sig = signal(
            "s",
            &[true, false, false, false],
            &[false, false, true, false],
        );
        let portfolio = simulate_signals(&series, &sig, &frictionless()).unwrap();

        assert_eq!(portfolio.closed_trades.len(), 1);
        let trade = &portfolio.closed_trades[0];
        assert!((trade.entry_price - 100.0).abs() < f64::EPSILON);
        assert!((trade.exit_price - 120.0).abs() < f64::EPSILON);
        assert_eq!(trade.bars_held, 2);
        // 1000 shares * 20 gain
        assert!((trade.pnl - 20_000.0).abs() < 1e-9);
        assert!((portfolio.final_equity() - 120_000.0).abs() < 1e-9);
    }

    #[test]
    fn frictions_reduce_fill_and_proceeds() {
        let series = make_series(&[100.0, 100.0]);
        let sig = signal("s", &[true, false], &[false, true]);
        let config = BacktestConfig {
            fee_rate: 0.001,
            slippage_rate: 0.001,
            ..BacktestConfig::default()
        };
        let portfolio = simulate_signals(&series, &sig, &config).unwrap();

        // Entry: 100k notional, 200 friction → 998 shares.
        // Exit: 99_800 notional, 199.6 friction.
        let trade = &portfolio.closed_trades[0];
        assert!((trade.quantity - 998.0).abs() < 1e-9);
        assert!((trade.pnl - (99_800.0 - 199.6 - 100_000.0)).abs() < 1e-9);
        assert!((portfolio.final_equity() - 99_600.4).abs() < 1e-9);
    }

    #[test]
    fn entry_wins_same_bar_conflict_and_holds() {
        let series = make_series(&[100.0, 110.0, 120.0]);
        // Both true on bar 0: entry priority, not closeable until bar 2.
        let sig = signal("s", &[true, false, false], &[true, false, true]);
        let portfolio = simulate_signals(&series, &sig, &frictionless()).unwrap();

        assert_eq!(portfolio.closed_trades.len(), 1);
        let trade = &portfolio.closed_trades[0];
        assert_eq!(trade.bars_held, 2);
        assert!((trade.exit_price - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn redundant_signals_are_no_ops() {
        let series = make_series(&[100.0, 110.0, 120.0, 130.0]);
        // Exit while flat (bar 0), double entry (bars 1-2).
        let sig = signal(
            "s",
            &[false, true, true, false],
            &[true, false, false, true],
        );
        let portfolio = simulate_signals(&series, &sig, &frictionless()).unwrap();

        assert_eq!(portfolio.closed_trades.len(), 1);
        let trade = &portfolio.closed_trades[0];
        // Entered on bar 1, not re-entered on bar 2.
        assert!((trade.entry_price - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_signals_keeps_cash_flat() {
        let series = make_series(&[100.0, 90.0, 80.0]);
        let sig = signal("s", &[false; 3], &[false; 3]);
        let portfolio = simulate_signals(&series, &sig, &frictionless()).unwrap();

        assert!(portfolio.closed_trades.is_empty());
        assert!((portfolio.final_equity() - 100_000.0).abs() < f64::EPSILON);
        for point in &portfolio.equity_curve {
            assert!((point.equity - 100_000.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn open_position_marks_to_market() {
        let series = make_series(&[100.0, 150.0]);
        let sig = signal("s", &[true, false], &[false, false]);
        let portfolio = simulate_signals(&series, &sig, &frictionless()).unwrap();

        assert!(portfolio.closed_trades.is_empty());
        assert!(!portfolio.is_flat());
        assert!((portfolio.final_equity() - 150_000.0).abs() < 1e-9);
    }

    #[test]
    fn length_mismatch_is_simulation_error() {
        let series = make_series(&[100.0, 110.0]);
        let sig = signal("s", &[true], &[false]);
        let err = simulate_signals(&series, &sig, &frictionless()).unwrap_err();
        assert!(matches!(err, AlphalabError::SignalMismatch { .. }));
    }

    #[test]
    fn non_positive_price_is_simulation_error() {
        let series = make_series(&[100.0, 0.0]);
        let sig = signal("s", &[false, false], &[false, false]);
        let err = simulate_signals(&series, &sig, &frictionless()).unwrap_err();
        assert!(matches!(err, AlphalabError::Simulation { .. }));
    }

    #[test]
    fn buy_hold_tracks_price() {
        let series = make_series(&[100.0, 120.0, 90.0]);
        let portfolio = simulate_buy_hold(&series, &frictionless()).unwrap();

        let equities: Vec<f64> = portfolio.equity_curve.iter().map(|p| p.equity).collect();
        assert!((equities[0] - 100_000.0).abs() < 1e-9);
        assert!((equities[1] - 120_000.0).abs() < 1e-9);
        assert!((equities[2] - 90_000.0).abs() < 1e-9);
        // Benchmark holds: never closes.
        assert!(portfolio.closed_trades.is_empty());
    }

    #[test]
    fn buy_hold_empty_series() {
        let series = make_series(&[]);
        let portfolio = simulate_buy_hold(&series, &frictionless()).unwrap();
        assert!(portfolio.equity_curve.is_empty());
        assert!(portfolio.is_flat());
    }
}

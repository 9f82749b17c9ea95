//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::builtin_strategy_adapter::BuiltinStrategyAdapter;
use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::paper_broker_adapter::PaperBrokerAdapter;
use crate::domain::analysis::AnalysisReport;
use crate::domain::backtest::{run_backtest, BacktestConfig};
use crate::domain::config_validation::build_backtest_config;
use crate::domain::error::AlphalabError;
use crate::domain::indicator::compute_indicators;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::rank::{rank, RankKey};
use crate::domain::scoring::{score, Signal};
use crate::ports::broker_port::BrokerPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;
use crate::ports::strategy_port::StrategyPort;

#[derive(Parser, Debug)]
#[command(
    name = "alphalab",
    about = "Equity research: indicator scoring and strategy backtesting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full pipeline: score, backtest the catalogue, rank, report
    Analyze {
        /// Directory holding <SYMBOL>_<EXCHANGE>.csv files
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "NSE")]
        exchange: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Ranking key: sharpe, sortino, calmar, total-return, cagr
        #[arg(long, default_value = "sharpe")]
        rank_by: String,
        /// Place a paper order when the composite signal says buy or sell
        #[arg(long)]
        paper_trade: bool,
    },
    /// Backtest the strategy catalogue and rank it
    Backtest {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "NSE")]
        exchange: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "sharpe")]
        rank_by: String,
    },
    /// Score a symbol's latest technical picture
    Score {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "NSE")]
        exchange: String,
    },
    /// Show the stored data range for a symbol
    Info {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "NSE")]
        exchange: String,
    },
    /// List symbols available in a data directory
    ListSymbols {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, default_value = "NSE")]
        exchange: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            data,
            symbol,
            exchange,
            config,
            output,
            rank_by,
            paper_trade,
        } => run_analyze(
            &data,
            &symbol,
            &exchange,
            config.as_ref(),
            output.as_ref(),
            &rank_by,
            paper_trade,
        ),
        Command::Backtest {
            data,
            symbol,
            exchange,
            config,
            rank_by,
        } => run_backtest_command(&data, &symbol, &exchange, config.as_ref(), &rank_by),
        Command::Score {
            data,
            symbol,
            exchange,
        } => run_score(&data, &symbol, &exchange),
        Command::Info {
            data,
            symbol,
            exchange,
        } => run_info(&data, &symbol, &exchange),
        Command::ListSymbols { data, exchange } => run_list_symbols(&data, &exchange),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

/// The core pipeline over an in-memory series: indicators, scoring,
/// catalogue backtest, ranking.
pub fn analyze_series(
    series: &PriceSeries,
    config: &BacktestConfig,
    rank_key: RankKey,
    strategies: &dyn StrategyPort,
) -> Result<AnalysisReport, AlphalabError> {
    let frame = compute_indicators(series)?;
    let score_report = score(&frame, &series.symbol);
    let signals = strategies.generate(&series.symbol, &frame)?;
    let backtest_report = run_backtest(series, &signals, config);
    let ranking = rank(&backtest_report, rank_key);
    Ok(AnalysisReport {
        symbol: series.symbol.clone(),
        score: score_report,
        backtest: backtest_report,
        ranking,
    })
}

pub fn load_backtest_config(path: Option<&PathBuf>) -> Result<BacktestConfig, AlphalabError> {
    match path {
        Some(path) => {
            let adapter =
                FileConfigAdapter::from_file(path).map_err(|e| AlphalabError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            build_backtest_config(&adapter)
        }
        None => Ok(BacktestConfig::default()),
    }
}

fn parse_rank_key(rank_by: &str) -> Result<RankKey, AlphalabError> {
    rank_by
        .parse()
        .map_err(|reason| AlphalabError::ConfigInvalid {
            section: "cli".to_string(),
            key: "rank-by".to_string(),
            reason,
        })
}

fn fetch_full_series(
    adapter: &CsvDataAdapter,
    symbol: &str,
    exchange: &str,
) -> Result<PriceSeries, AlphalabError> {
    let Some((first, last, bars)) = adapter.data_range(symbol, exchange)? else {
        return Err(AlphalabError::NoData {
            symbol: symbol.to_string(),
            exchange: exchange.to_string(),
        });
    };
    eprintln!("Loading {bars} bars for {symbol} ({first} to {last})");
    adapter.fetch_series(symbol, exchange, first, last)
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    data: &PathBuf,
    symbol: &str,
    exchange: &str,
    config_path: Option<&PathBuf>,
    output: Option<&PathBuf>,
    rank_by: &str,
    paper_trade: bool,
) -> Result<(), AlphalabError> {
    let config = load_backtest_config(config_path)?;
    let rank_key = parse_rank_key(rank_by)?;

    let adapter = CsvDataAdapter::new(data.clone());
    let series = fetch_full_series(&adapter, symbol, exchange)?;

    eprintln!("Computing indicators and scores");
    let report = analyze_series(&series, &config, rank_key, &BuiltinStrategyAdapter)?;

    eprintln!(
        "Composite score {:.1} ({}), top strategies: {}",
        report.score.overall_score,
        report.score.signal,
        report.top_names(3).join(", ")
    );

    if paper_trade {
        let broker = PaperBrokerAdapter::new();
        match report.score.signal {
            Signal::Buy => {
                let order = broker.buy(symbol, exchange, 1)?;
                eprintln!("Placed paper order {order}");
            }
            Signal::Sell => {
                let order = broker.sell(symbol, exchange, 1)?;
                eprintln!("Placed paper order {order}");
            }
            Signal::Neutral => eprintln!("Neutral signal, no order placed"),
        }
    }

    let renderer = JsonReportAdapter::new();
    match output {
        Some(path) => {
            renderer.write(&report, path)?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{}", renderer.render(&report)?),
    }
    Ok(())
}

fn run_backtest_command(
    data: &PathBuf,
    symbol: &str,
    exchange: &str,
    config_path: Option<&PathBuf>,
    rank_by: &str,
) -> Result<(), AlphalabError> {
    let config = load_backtest_config(config_path)?;
    let rank_key = parse_rank_key(rank_by)?;

    let adapter = CsvDataAdapter::new(data.clone());
    let series = fetch_full_series(&adapter, symbol, exchange)?;

    let frame = compute_indicators(&series)?;
    let signals = BuiltinStrategyAdapter.generate(symbol, &frame)?;
    eprintln!("Backtesting {} strategies", signals.len());
    let report = run_backtest(&series, &signals, &config);
    let ranking = rank(&report, rank_key);

    let rendered = serde_json::json!({
        "backtest": report,
        "ranking": ranking,
    });
    println!("{}", serde_json::to_string_pretty(&rendered).unwrap_or_default());
    Ok(())
}

fn run_score(data: &PathBuf, symbol: &str, exchange: &str) -> Result<(), AlphalabError> {
    let adapter = CsvDataAdapter::new(data.clone());
    let series = fetch_full_series(&adapter, symbol, exchange)?;

    let frame = compute_indicators(&series)?;
    let report = score(&frame, symbol);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_default()
    );
    Ok(())
}

fn run_info(data: &PathBuf, symbol: &str, exchange: &str) -> Result<(), AlphalabError> {
    let adapter = CsvDataAdapter::new(data.clone());
    match adapter.data_range(symbol, exchange)? {
        Some((first, last, bars)) => {
            println!("{symbol} on {exchange}: {bars} bars, {first} to {last}");
        }
        None => println!("{symbol} on {exchange}: no data"),
    }
    Ok(())
}

fn run_list_symbols(data: &PathBuf, exchange: &str) -> Result<(), AlphalabError> {
    let adapter = CsvDataAdapter::new(data.clone());
    for symbol in adapter.list_symbols(exchange)? {
        println!("{symbol}");
    }
    Ok(())
}

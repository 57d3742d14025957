use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use backtest::{report, Backtester};
use common::{Candle, Config, Result};
use strategy::{StrategyFileConfig, StrategyRegistry};
use tracker::{JsonFileStore, TrackerEngine};

#[derive(Parser)]
#[command(
    name = "pulsebot",
    about = "Candle backtesting and threshold-gated market price tracking"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score the strategy set against a JSON candle series.
    Backtest {
        /// Path to a JSON array of OHLCV candles, oldest first.
        candles: PathBuf,
    },
    /// Register a market for price tracking.
    Register {
        market: String,
        /// Contracts held in this market.
        #[arg(long, default_value_t = 0.0)]
        contracts: f64,
        /// Total cost paid for the position.
        #[arg(long, default_value_t = 0.0)]
        total_cost: f64,
        /// Market page URL, shown in alert text.
        #[arg(long)]
        url: Option<String>,
    },
    /// Record a newly observed price (0..1) for a tracked market.
    Track { market: String, price: f64 },
    /// Show the current state of all tracked markets.
    Status,
}

fn main() -> ExitCode {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    let cli = Cli::parse();

    match run(cli.command, &cfg) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command, cfg: &Config) -> Result<ExitCode> {
    match command {
        Command::Backtest { candles } => {
            let registry = match &cfg.strategy_config_path {
                Some(path) => StrategyRegistry::from_config(&StrategyFileConfig::load(path)?)?,
                None => StrategyRegistry::defaults(),
            };

            let series = load_candles(&candles)?;
            info!(candles = series.len(), path = %candles.display(), "Candle series loaded");

            let run = Backtester::new(&registry).run(&series);
            print!("{}", report::render_reports(&run.reports));
            Ok(ExitCode::SUCCESS)
        }

        Command::Register {
            market,
            contracts,
            total_cost,
            url,
        } => {
            let engine = tracker_engine(cfg);
            engine.register(&market, contracts, total_cost, url)?;
            println!("Registered: {market}");
            Ok(ExitCode::SUCCESS)
        }

        Command::Track { market, price } => {
            let engine = tracker_engine(cfg);
            let outcome = engine.update(&market, price)?;

            println!("{market}");
            println!(
                "  Price: {} -> {}",
                format_price(outcome.old_price),
                format_price(Some(outcome.new_price)),
            );
            if let Some(change) = outcome.change {
                println!("  Change: {:+.2}%", change * 100.0);
            }
            println!(
                "  Portfolio: ${:.2} (profit: ${:.2})",
                outcome.portfolio_value, outcome.profit
            );

            // A fired alert exits non-zero so an external notifier can react.
            if let Some(alert) = &outcome.alert {
                println!("\n{}", report::render_alert(alert));
                return Ok(ExitCode::from(1));
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Status => {
            let engine = tracker_engine(cfg);
            let state = engine.status()?;

            if state.markets.is_empty() {
                println!("No markets tracked.");
                return Ok(ExitCode::SUCCESS);
            }
            for (name, record) in &state.markets {
                println!(
                    "{name}: {} (was {}), {} contracts, cost ${:.2}",
                    format_price(record.current_price),
                    format_price(record.previous_price),
                    record.positions.contracts,
                    record.positions.total_cost,
                );
            }
            if let Some(at) = state.last_updated {
                println!("Last updated: {}", at.to_rfc3339());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn tracker_engine(cfg: &Config) -> TrackerEngine<JsonFileStore> {
    TrackerEngine::new(JsonFileStore::new(&cfg.state_path), cfg.alert_threshold)
}

fn load_candles(path: &PathBuf) -> Result<Vec<Candle>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("{:.1}%", p * 100.0),
        None => "N/A".to_string(),
    }
}

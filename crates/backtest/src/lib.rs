pub mod report;

use common::{Candle, Direction, FiredSignal, StrategyReport};
use strategy::StrategyRegistry;
use tracing::{debug, info};

/// Result of one backtest pass: per-strategy reports in registry order,
/// plus every signal that fired. Both are discarded after reporting;
/// nothing here is persisted.
#[derive(Debug)]
pub struct BacktestRun {
    pub reports: Vec<StrategyReport>,
    pub signals: Vec<FiredSignal>,
}

/// Scores a registry of strategies against a historical candle series.
///
/// One linear scan over the fully-materialized series. Each strategy is
/// evaluated at every index where its lookback window is populated and a
/// subsequent candle exists; a fired signal is a win iff the predicted
/// direction matches the realized move of the next close. Strategies are
/// independent; one firing never suppresses another.
pub struct Backtester<'a> {
    registry: &'a StrategyRegistry,
}

impl<'a> Backtester<'a> {
    pub fn new(registry: &'a StrategyRegistry) -> Self {
        Self { registry }
    }

    /// Run every registered strategy over the series.
    ///
    /// A series too short for a strategy's window is a normal degenerate
    /// case: that strategy reports zero signals and a 0.0 win rate.
    pub fn run(&self, candles: &[Candle]) -> BacktestRun {
        let n = candles.len();
        let mut signals = Vec::new();
        let mut reports = Vec::with_capacity(self.registry.len());

        for strategy in self.registry.strategies() {
            let window = strategy.window();
            let mut wins = 0u32;
            let mut losses = 0u32;

            // Valid indices need `window` candles of history and one
            // candle after for scoring.
            if n >= window + 2 {
                for i in window..n - 1 {
                    let history = &candles[i - window..i];
                    let current = &candles[i];

                    let Some(direction) = strategy.evaluate(history, current) else {
                        continue;
                    };

                    let realized = realized_direction(current.close, candles[i + 1].close);
                    if direction == realized {
                        wins += 1;
                    } else {
                        losses += 1;
                    }

                    debug!(
                        strategy = strategy.id(),
                        index = i,
                        predicted = %direction,
                        realized = %realized,
                        "Signal scored"
                    );
                    signals.push(FiredSignal {
                        index: i,
                        direction,
                        strategy_id: strategy.id().to_string(),
                    });
                }
            }

            reports.push(StrategyReport::from_tally(strategy.id(), wins, losses));
        }

        info!(
            candles = n,
            strategies = self.registry.len(),
            signals = signals.len(),
            "Backtest complete"
        );
        BacktestRun { reports, signals }
    }
}

/// Realized direction of the next-candle move. Equal closes resolve to
/// Down: this is a move comparison, not a tie state.
fn realized_direction(current_close: f64, next_close: f64) -> Direction {
    if next_close > current_close {
        Direction::Up
    } else {
        Direction::Down
    }
}

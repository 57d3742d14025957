pub mod breakout;
pub mod config;
pub mod momentum;
pub mod range_reversal;
pub mod registry;
pub mod squeeze;

pub use config::{StrategyConfig, StrategyFileConfig};
pub use registry::StrategyRegistry;

use common::{Candle, Direction};

/// All strategy implementations must satisfy this trait.
///
/// A strategy is a pure predicate over a fixed-size trailing window plus
/// the current candle. The backtest runner guarantees `window` holds
/// exactly `self.window()` candles, oldest first, ending immediately
/// before `current`, and only invokes a strategy when a subsequent candle
/// exists to score against.
pub trait Strategy: Send + Sync {
    /// Identifier used in reports and logs.
    fn id(&self) -> &str;

    /// Number of candles strictly before the current one this strategy
    /// inspects. No signal can fire before this much history exists.
    fn window(&self) -> usize;

    /// Evaluate the window and the current candle.
    /// Returns `None` when no directional prediction fires.
    fn evaluate(&self, window: &[Candle], current: &Candle) -> Option<Direction>;
}

use common::{Candle, Direction};

use crate::Strategy;

/// Trend-continuation strategy.
///
/// Fires when every candle in the window is strictly bullish
/// (`close > open`) or strictly bearish, predicting the trend continues
/// through the next candle. Doji candles (`close == open`) break the run.
#[derive(Debug, Clone)]
pub struct Momentum {
    id: String,
    window: usize,
}

impl Momentum {
    pub const DEFAULT_WINDOW: usize = 3;

    pub fn new(id: impl Into<String>, window: usize) -> Self {
        assert!(window >= 1, "momentum window must be >= 1");
        Self {
            id: id.into(),
            window,
        }
    }
}

impl Strategy for Momentum {
    fn id(&self) -> &str {
        &self.id
    }

    fn window(&self) -> usize {
        self.window
    }

    fn evaluate(&self, window: &[Candle], _current: &Candle) -> Option<Direction> {
        if window.iter().all(Candle::is_bullish) {
            Some(Direction::Up)
        } else if window.iter().all(Candle::is_bearish) {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

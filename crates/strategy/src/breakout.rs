use common::{Candle, Direction};

use crate::Strategy;

/// Previous-candle breakout strategy.
///
/// A close above the previous candle's high predicts Up; a close below
/// the previous candle's low predicts Down. The high break is checked
/// first; a close inside the previous bar's range fires nothing.
#[derive(Debug, Clone)]
pub struct Breakout {
    id: String,
}

impl Breakout {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Strategy for Breakout {
    fn id(&self) -> &str {
        &self.id
    }

    fn window(&self) -> usize {
        1
    }

    fn evaluate(&self, window: &[Candle], current: &Candle) -> Option<Direction> {
        let prev = window.last()?;
        if current.close > prev.high {
            Some(Direction::Up)
        } else if current.close < prev.low {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

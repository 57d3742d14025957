use common::{Candle, Direction};

use crate::Strategy;

/// Volatility-squeeze breakout strategy.
///
/// A squeeze holds when the current candle's range is below `ratio`
/// times the mean range of the window. Under a squeeze, a close above
/// the window's last high predicts Up and a close below its last low
/// predicts Down (up checked first). A squeeze with no breakout fires
/// nothing.
#[derive(Debug, Clone)]
pub struct VolatilitySqueeze {
    id: String,
    window: usize,
    ratio: f64,
}

impl VolatilitySqueeze {
    pub const DEFAULT_WINDOW: usize = 5;
    pub const DEFAULT_RATIO: f64 = 0.5;

    pub fn new(id: impl Into<String>, window: usize, ratio: f64) -> Self {
        assert!(window >= 1, "squeeze window must be >= 1");
        assert!(ratio > 0.0, "squeeze ratio must be positive");
        Self {
            id: id.into(),
            window,
            ratio,
        }
    }
}

impl Strategy for VolatilitySqueeze {
    fn id(&self) -> &str {
        &self.id
    }

    fn window(&self) -> usize {
        self.window
    }

    fn evaluate(&self, window: &[Candle], current: &Candle) -> Option<Direction> {
        let mean_range =
            window.iter().map(Candle::range).sum::<f64>() / window.len() as f64;
        if current.range() >= mean_range * self.ratio {
            return None;
        }

        let last = window.last()?;
        if current.close > last.high {
            Some(Direction::Up)
        } else if current.close < last.low {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candle(high: f64, low: f64, close: f64) -> Candle {
        Candle {
            timestamp: Utc::now(),
            open: close,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    fn wide_window(n: usize) -> Vec<Candle> {
        // Mean range 10.0 → squeeze threshold 5.0 at the default ratio.
        (0..n).map(|_| candle(105.0, 95.0, 100.0)).collect()
    }

    #[test]
    fn squeeze_with_upward_breakout_predicts_up() {
        let strategy = VolatilitySqueeze::new("volatility_squeeze", 5, 0.5);
        let window = wide_window(5);
        // Range 2.0 < 5.0 and close above the last candle's high of 105.
        let current = candle(106.0, 104.0, 105.5);
        assert_eq!(strategy.evaluate(&window, &current), Some(Direction::Up));
    }

    #[test]
    fn squeeze_with_downward_breakout_predicts_down() {
        let strategy = VolatilitySqueeze::new("volatility_squeeze", 5, 0.5);
        let window = wide_window(5);
        let current = candle(95.5, 93.5, 94.0);
        assert_eq!(strategy.evaluate(&window, &current), Some(Direction::Down));
    }

    #[test]
    fn squeeze_without_breakout_fires_nothing() {
        let strategy = VolatilitySqueeze::new("volatility_squeeze", 5, 0.5);
        let window = wide_window(5);
        // Tight range but the close stays inside the last candle's bar.
        let current = candle(101.0, 99.0, 100.0);
        assert_eq!(strategy.evaluate(&window, &current), None);
    }

    #[test]
    fn no_squeeze_means_no_signal_even_on_breakout() {
        let strategy = VolatilitySqueeze::new("volatility_squeeze", 5, 0.5);
        let window = wide_window(5);
        // Close above the last high, but the current range is too wide.
        let current = candle(110.0, 100.0, 109.0);
        assert_eq!(strategy.evaluate(&window, &current), None);
    }

    #[test]
    fn flat_window_never_squeezes() {
        let strategy = VolatilitySqueeze::new("volatility_squeeze", 5, 0.5);
        // Mean range is zero, so no current range can be below it.
        let window: Vec<Candle> = (0..5).map(|_| candle(100.0, 100.0, 100.0)).collect();
        let current = candle(100.0, 100.0, 100.0);
        assert_eq!(strategy.evaluate(&window, &current), None);
    }
}

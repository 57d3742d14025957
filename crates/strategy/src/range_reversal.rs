use common::{Candle, Direction};

use crate::Strategy;

/// Mean-reversion strategy against the trailing range.
///
/// Computes the highest high and lowest low over the window. A close
/// within `band` of the range top predicts a reversal Down; a close
/// within `band` of the range bottom predicts a reversal Up.
///
/// The near-top check is evaluated first and wins if an extremely tight
/// range ever lets both conditions hold at once.
#[derive(Debug, Clone)]
pub struct RangeReversal {
    id: String,
    window: usize,
    band: f64,
}

impl RangeReversal {
    pub const DEFAULT_WINDOW: usize = 20;
    pub const DEFAULT_BAND: f64 = 0.005;

    pub fn new(id: impl Into<String>, window: usize, band: f64) -> Self {
        assert!(window >= 1, "range reversal window must be >= 1");
        assert!(
            (0.0..1.0).contains(&band),
            "range reversal band must be in [0, 1)"
        );
        Self {
            id: id.into(),
            window,
            band,
        }
    }
}

impl Strategy for RangeReversal {
    fn id(&self) -> &str {
        &self.id
    }

    fn window(&self) -> usize {
        self.window
    }

    fn evaluate(&self, window: &[Candle], current: &Candle) -> Option<Direction> {
        let range_high = window.iter().map(|c| c.high).fold(f64::MIN, f64::max);
        let range_low = window.iter().map(|c| c.low).fold(f64::MAX, f64::min);

        if current.close > range_high * (1.0 - self.band) {
            // Near the top of the range: expect a move back down.
            Some(Direction::Down)
        } else if current.close < range_low * (1.0 + self.band) {
            // Near the bottom of the range: expect a move back up.
            Some(Direction::Up)
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

    fn flat_window(n: usize, high: f64, low: f64) -> Vec<Candle> {
        (0..n).map(|_| candle(high, low, (high + low) / 2.0)).collect()
    }

    #[test]
    fn close_near_range_top_predicts_down() {
        let strategy = RangeReversal::new("range_reversal", 20, 0.005);
        // Range high 110 → threshold 109.45; 109.6 is inside the band.
        let window = flat_window(20, 110.0, 100.0);
        let current = candle(110.0, 109.0, 109.6);
        assert_eq!(strategy.evaluate(&window, &current), Some(Direction::Down));
    }

    #[test]
    fn close_near_range_bottom_predicts_up() {
        let strategy = RangeReversal::new("range_reversal", 20, 0.005);
        // Range low 100 → threshold 100.5; 100.2 is inside the band.
        let window = flat_window(20, 110.0, 100.0);
        let current = candle(101.0, 100.0, 100.2);
        assert_eq!(strategy.evaluate(&window, &current), Some(Direction::Up));
    }

    #[test]
    fn close_mid_range_fires_nothing() {
        let strategy = RangeReversal::new("range_reversal", 20, 0.005);
        let window = flat_window(20, 110.0, 100.0);
        let current = candle(106.0, 104.0, 105.0);
        assert_eq!(strategy.evaluate(&window, &current), None);
    }

    #[test]
    fn near_top_wins_when_both_bands_overlap() {
        // A razor-thin range makes both bands cover the whole close span.
        let strategy = RangeReversal::new("range_reversal", 5, 0.005);
        let window = flat_window(5, 100.2, 100.0);
        let current = candle(100.2, 100.0, 100.1);
        assert_eq!(strategy.evaluate(&window, &current), Some(Direction::Down));
    }
}

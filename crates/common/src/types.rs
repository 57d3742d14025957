use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One OHLCV bar for a fixed time interval.
///
/// A backtest series is ordered by timestamp ascending with no duplicate
/// timestamps. Candles are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Accepts either epoch milliseconds or an RFC 3339 string on input;
    /// both normalize to UTC so ordering is uniform downstream.
    #[serde(deserialize_with = "timestamp_or_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    /// High-low spread of this bar.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Candle feeds in the wild carry timestamps either as epoch-millis
/// integers or as ISO-8601 strings.
fn timestamp_or_rfc3339<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {ms}"))),
        Raw::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom),
    }
}

/// Predicted (or realized) direction of the next-candle move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// A directional prediction fired by a strategy at a candle index.
/// Scored against the candle at `index + 1`.
#[derive(Debug, Clone, Serialize)]
pub struct FiredSignal {
    pub index: usize,
    pub direction: Direction,
    pub strategy_id: String,
}

/// Per-strategy scoring summary for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyReport {
    pub strategy_id: String,
    pub signal_count: u32,
    pub wins: u32,
    pub losses: u32,
    /// Win rate as a percentage in `[0, 100]`. Zero when no signals fired.
    pub win_rate: f64,
}

impl StrategyReport {
    /// Build a report from a win/loss tally. `signal_count` is always
    /// `wins + losses`; a zero tally yields a 0.0 win rate, not NaN.
    pub fn from_tally(strategy_id: impl Into<String>, wins: u32, losses: u32) -> Self {
        let signal_count = wins + losses;
        let win_rate = if signal_count > 0 {
            100.0 * f64::from(wins) / f64::from(signal_count)
        } else {
            0.0
        };
        Self {
            strategy_id: strategy_id.into(),
            signal_count,
            wins,
            losses,
            win_rate,
        }
    }
}

/// Position held in a tracked market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Positions {
    pub contracts: f64,
    pub total_cost: f64,
}

/// Persisted per-market record. `previous_price` always holds the value
/// `current_price` had immediately before the latest update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub current_price: Option<f64>,
    pub previous_price: Option<f64>,
    pub last_change: Option<f64>,
    #[serde(default)]
    pub positions: Positions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One line of the append-only audit trail. Never reordered or compacted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub market: String,
    pub price: f64,
    pub change: Option<f64>,
    pub portfolio_value: f64,
    pub profit: f64,
}

/// The full persisted tracker state. Loaded whole, mutated in memory,
/// written back whole on every update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerState {
    #[serde(default)]
    pub markets: BTreeMap<String, PriceRecord>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Payload handed to the external notifier when a tracked price moves
/// by at least the alert threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub market: String,
    pub old_price: f64,
    pub new_price: f64,
    pub change: f64,
    /// Change as a percentage with two decimals, e.g. "35.00".
    pub change_pct: String,
    /// Market page URL carried over from the tracked record, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(
        market: impl Into<String>,
        old_price: f64,
        new_price: f64,
        change: f64,
        url: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            market: market.into(),
            old_price,
            new_price,
            change,
            change_pct: format!("{:.2}", change * 100.0),
            url,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candle_timestamp_accepts_epoch_millis() {
        let json = r#"{"timestamp":1700000000000,"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":10.0}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(candle.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn candle_timestamp_accepts_rfc3339() {
        let json = r#"{"timestamp":"2026-02-09T12:00:00Z","open":1.0,"high":2.0,"low":0.5,"close":1.5}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(candle.timestamp.to_rfc3339(), "2026-02-09T12:00:00+00:00");
        assert_eq!(candle.volume, 0.0); // volume defaults when absent
    }

    #[test]
    fn mixed_timestamp_forms_order_comparably() {
        let a: Candle = serde_json::from_str(
            r#"{"timestamp":"2026-02-09T12:00:00Z","open":1.0,"high":1.0,"low":1.0,"close":1.0}"#,
        )
        .unwrap();
        let b: Candle = serde_json::from_str(
            r#"{"timestamp":1770638500000,"open":1.0,"high":1.0,"low":1.0,"close":1.0}"#,
        )
        .unwrap();
        assert!(a.timestamp < b.timestamp);
    }

    #[test]
    fn report_win_rate_is_zero_without_signals() {
        let report = StrategyReport::from_tally("momentum", 0, 0);
        assert_eq!(report.signal_count, 0);
        assert_eq!(report.win_rate, 0.0);
    }

    #[test]
    fn report_win_rate_is_percentage() {
        let report = StrategyReport::from_tally("breakout", 3, 1);
        assert_eq!(report.signal_count, 4);
        assert!((report.win_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn alert_change_pct_has_two_decimals() {
        let alert = AlertEvent::new("M", 0.20, 0.27, 0.35, None, Utc::now());
        assert_eq!(alert.change_pct, "35.00");
    }

    #[test]
    fn alert_serializes_url_when_present() {
        let alert = AlertEvent::new(
            "M",
            0.20,
            0.27,
            0.35,
            Some("https://example.com/m".to_string()),
            Utc::now(),
        );
        let json = serde_json::to_string(&alert).unwrap();
        assert!(json.contains("https://example.com/m"));

        let bare = AlertEvent::new("M", 0.20, 0.27, 0.35, None, Utc::now());
        let json = serde_json::to_string(&bare).unwrap();
        assert!(!json.contains("url"));
    }

    #[test]
    fn tracker_state_round_trips_camel_case() {
        let mut state = TrackerState::default();
        state.markets.insert(
            "US Strikes Iran by Feb 9, 2026".to_string(),
            PriceRecord {
                current_price: Some(0.12),
                previous_price: Some(0.10),
                last_change: Some(0.2),
                positions: Positions {
                    contracts: 100.0,
                    total_cost: 10.0,
                },
                url: None,
            },
        );

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("currentPrice"));
        assert!(json.contains("totalCost"));
        assert!(json.contains("lastUpdated"));

        let back: TrackerState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}

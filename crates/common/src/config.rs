/// All configuration loaded from environment variables at startup.
/// Every key has a usable default, so a bare environment still runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the persisted tracker state blob.
    pub state_path: String,

    /// Relative price move that triggers an alert (0.05 = 5%).
    pub alert_threshold: f64,

    /// Optional TOML strategy file. When unset the backtester runs the
    /// built-in default strategy set.
    pub strategy_config_path: Option<String>,
}

impl Config {
    pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.05;

    /// Load configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Config {
            state_path: optional_env("STATE_PATH")
                .unwrap_or_else(|| "price-tracker.json".to_string()),
            alert_threshold: optional_env("ALERT_THRESHOLD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::DEFAULT_ALERT_THRESHOLD),
            strategy_config_path: optional_env("STRATEGY_CONFIG_PATH"),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

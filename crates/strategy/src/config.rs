use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use common::{Error, Result};

/// Top-level strategy config file (TOML).
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// type = "momentum"
/// name = "BTC momentum 3"
///
/// [strategy.params]
/// window = 3
///
/// [[strategy]]
/// type = "range_reversal"
/// name = "BTC range fade"
///
/// [strategy.params]
/// window = 20
/// band = 0.005
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    #[serde(rename = "strategy")]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Strategy type identifier: "momentum", "breakout",
    /// "range_reversal" or "volatility_squeeze".
    #[serde(rename = "type")]
    pub strategy_type: String,
    /// Identifier shown in reports and logs.
    pub name: String,
    /// Strategy-specific parameters.
    #[serde(default)]
    pub params: HashMap<String, toml::Value>,
}

impl StrategyFileConfig {
    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read '{path}': {e}")))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse '{path}': {e}")))
    }
}

use std::collections::HashMap;

use tracing::info;

use common::{Error, Result};

use crate::breakout::Breakout;
use crate::config::{StrategyConfig, StrategyFileConfig};
use crate::momentum::Momentum;
use crate::range_reversal::RangeReversal;
use crate::squeeze::VolatilitySqueeze;
use crate::Strategy;

/// Ordered collection of strategies evaluated in a single backtest pass.
///
/// Order is preserved from construction; strategies are independent and
/// one firing never suppresses another.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    /// The four built-in strategies with their standard parameters.
    pub fn defaults() -> Self {
        Self {
            strategies: vec![
                Box::new(Momentum::new("momentum", Momentum::DEFAULT_WINDOW)),
                Box::new(Breakout::new("breakout")),
                Box::new(RangeReversal::new(
                    "range_reversal",
                    RangeReversal::DEFAULT_WINDOW,
                    RangeReversal::DEFAULT_BAND,
                )),
                Box::new(VolatilitySqueeze::new(
                    "volatility_squeeze",
                    VolatilitySqueeze::DEFAULT_WINDOW,
                    VolatilitySqueeze::DEFAULT_RATIO,
                )),
            ],
        }
    }

    /// Build the registry from config, failing on unknown strategy types.
    pub fn from_config(file_cfg: &StrategyFileConfig) -> Result<Self> {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();

        for cfg in &file_cfg.strategies {
            let strategy = build_strategy(cfg)?;
            info!(id = %strategy.id(), window = strategy.window(), "Registered strategy");
            strategies.push(strategy);
        }

        Ok(Self { strategies })
    }

    pub fn strategies(&self) -> &[Box<dyn Strategy>] {
        &self.strategies
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

// ─── Strategy builders ────────────────────────────────────────────────────────

fn build_strategy(cfg: &StrategyConfig) -> Result<Box<dyn Strategy>> {
    match cfg.strategy_type.as_str() {
        "momentum" => {
            let window = param_usize(&cfg.params, "window", Momentum::DEFAULT_WINDOW);
            Ok(Box::new(Momentum::new(cfg.name.clone(), window)))
        }
        "breakout" => Ok(Box::new(Breakout::new(cfg.name.clone()))),
        "range_reversal" => {
            let window = param_usize(&cfg.params, "window", RangeReversal::DEFAULT_WINDOW);
            let band = param_f64(&cfg.params, "band", RangeReversal::DEFAULT_BAND);
            Ok(Box::new(RangeReversal::new(cfg.name.clone(), window, band)))
        }
        "volatility_squeeze" => {
            let window = param_usize(&cfg.params, "window", VolatilitySqueeze::DEFAULT_WINDOW);
            let ratio = param_f64(&cfg.params, "ratio", VolatilitySqueeze::DEFAULT_RATIO);
            Ok(Box::new(VolatilitySqueeze::new(cfg.name.clone(), window, ratio)))
        }
        other => Err(Error::Config(format!("unknown strategy type '{other}'"))),
    }
}

fn param_f64(params: &HashMap<String, toml::Value>, key: &str, default: f64) -> f64 {
    params.get(key).and_then(|v| v.as_float()).unwrap_or(default)
}

fn param_usize(params: &HashMap<String, toml::Value>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|v| v.as_integer())
        .map(|v| v as usize)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hold_all_four_strategies_in_order() {
        let registry = StrategyRegistry::defaults();
        let ids: Vec<&str> = registry.strategies().iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            vec!["momentum", "breakout", "range_reversal", "volatility_squeeze"]
        );
    }

    #[test]
    fn from_config_builds_named_strategies() {
        let toml_src = r#"
            [[strategy]]
            type = "momentum"
            name = "fast momentum"

            [strategy.params]
            window = 5

            [[strategy]]
            type = "breakout"
            name = "prev-bar breakout"
        "#;
        let file_cfg: StrategyFileConfig = toml::from_str(toml_src).unwrap();
        let registry = StrategyRegistry::from_config(&file_cfg).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.strategies()[0].id(), "fast momentum");
        assert_eq!(registry.strategies()[0].window(), 5);
        assert_eq!(registry.strategies()[1].window(), 1);
    }

    #[test]
    fn unknown_strategy_type_is_a_config_error() {
        let toml_src = r#"
            [[strategy]]
            type = "martingale"
            name = "nope"
        "#;
        let file_cfg: StrategyFileConfig = toml::from_str(toml_src).unwrap();
        assert!(StrategyRegistry::from_config(&file_cfg).is_err());
    }
}

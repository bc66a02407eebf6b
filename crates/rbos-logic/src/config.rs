//! Engine configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::evaluator::EvalMode;

/// Default tick period in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Settings for a `LogicEngine`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Period of the tick loop
    pub interval_ms: u64,
    /// Evaluation order
    pub mode: EvalMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            mode: EvalMode::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Tick period as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.interval(), Duration::from_millis(100));
        assert_eq!(config.mode, EvalMode::Sequential);
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str("mode = \"topological\"").unwrap();
        assert_eq!(config.mode, EvalMode::Topological);
        assert_eq!(config.interval_ms, DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(EngineConfig::from_toml_str("interval_ms = \"fast\"").is_err());
    }
}

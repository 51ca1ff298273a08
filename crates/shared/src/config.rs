//! Application configuration management.

use serde::Deserialize;

/// Engine configuration.
///
/// All values have sensible defaults; deployments override them through
/// config files or `RXLEDGER__`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Decimal places used when rounding amounts for display.
    #[serde(default = "default_display_decimal_places")]
    pub display_decimal_places: u32,
    /// Days past the due date before an unpaid invoice counts as overdue.
    #[serde(default = "default_overdue_grace_days")]
    pub overdue_grace_days: i64,
}

fn default_display_decimal_places() -> u32 {
    2
}

fn default_overdue_grace_days() -> i64 {
    0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_decimal_places: default_display_decimal_places(),
            overdue_grace_days: default_overdue_grace_days(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RXLEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.display_decimal_places, 2);
        assert_eq!(config.overdue_grace_days, 0);
    }

    #[test]
    fn test_deserialize_partial_override() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"overdue_grace_days": 3}"#).unwrap();
        assert_eq!(config.display_decimal_places, 2);
        assert_eq!(config.overdue_grace_days, 3);
    }
}

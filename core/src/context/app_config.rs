use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::default_config_path;
use crate::messages::{DEFAULT_DELAY_TICKS, DeliveryMode};

use super::ContextError;

/// Name the library's own settings are stored under by `confy`.
pub const APP_NAME: &str = "requisite";

/// Library-level settings, separate from the mod configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequisiteConfig {
    /// Overrides the default configuration file location
    pub config_file: Option<PathBuf>,
    /// Delay applied by [`Requisite::queue_message`](super::Requisite::queue_message)
    pub message_delay_ticks: u32,
    pub delivery_mode: DeliveryMode,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Default for RequisiteConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            message_delay_ticks: DEFAULT_DELAY_TICKS,
            delivery_mode: DeliveryMode::default(),
            log_filter: None,
        }
    }
}

impl RequisiteConfig {
    /// Load from the platform config directory, writing defaults on first use.
    pub fn load() -> Result<Self, ContextError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Unwrap the result of [`load`](Self::load), logging the error and
    /// falling back to defaults.
    pub fn or_default(loaded: Result<Self, ContextError>) -> Self {
        loaded.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load library settings, using defaults");
            Self::default()
        })
    }

    pub fn store(&self) -> Result<(), ContextError> {
        confy::store(APP_NAME, None, self)?;
        Ok(())
    }

    /// The configuration file to open: the override if set, otherwise the
    /// platform default.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config_file.clone().or_else(default_config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_queue_defaults() {
        let config = RequisiteConfig::default();
        assert_eq!(config.message_delay_ticks, 20);
        assert_eq!(config.delivery_mode, DeliveryMode::SharedCounter);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: RequisiteConfig = toml::from_str("delivery_mode = \"per_entry\"").unwrap();
        assert_eq!(config.delivery_mode, DeliveryMode::PerEntry);
        assert_eq!(config.message_delay_ticks, DEFAULT_DELAY_TICKS);
    }

    #[test]
    fn override_wins_over_default_path() {
        let config = RequisiteConfig {
            config_file: Some(PathBuf::from("/tmp/mod.toml")),
            ..Default::default()
        };
        assert_eq!(config.config_path(), Some(PathBuf::from("/tmp/mod.toml")));
    }

    #[test]
    fn failed_load_falls_back_to_defaults() {
        let loaded = Err(ContextError::Config(crate::config::ConfigError::NoPath));
        assert_eq!(RequisiteConfig::or_default(loaded), RequisiteConfig::default());

        let stored = RequisiteConfig {
            message_delay_ticks: 5,
            ..Default::default()
        };
        assert_eq!(RequisiteConfig::or_default(Ok(stored.clone())), stored);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = RequisiteConfig {
            config_file: Some(PathBuf::from("mods/requisite.json")),
            message_delay_ticks: 40,
            delivery_mode: DeliveryMode::PerEntry,
            log_filter: Some("requisite_core=debug".to_string()),
        };
        let text = toml::to_string(&config).unwrap();
        let back: RequisiteConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}

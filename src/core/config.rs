//! Runtime economy tunables.
//!
//! Values that are not part of the fixed balance tables (critical rolls,
//! offline cap, save cadence) are supplied here so a host can tune them
//! from a JSON file without recompiling.

use crate::core::constants::{AUTOSAVE_INTERVAL_SECONDS, MAX_OFFLINE_SECONDS, MIN_ASCENSION_TICK_MS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Base probability in `[0, 1]` that a roll is critical.
    pub critical_chance: f64,
    /// Payout factor applied to a critical roll.
    pub critical_multiplier: f64,
    /// Offline replay never covers more than this.
    pub max_offline_seconds: u64,
    pub autosave_interval_seconds: u64,
    /// Ascension ticks shorter than this accrue nothing.
    pub ascension_min_tick_ms: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            critical_chance: 0.0,
            critical_multiplier: 2.0,
            max_offline_seconds: MAX_OFFLINE_SECONDS,
            autosave_interval_seconds: AUTOSAVE_INTERVAL_SECONDS,
            ascension_min_tick_ms: MIN_ASCENSION_TICK_MS,
        }
    }
}

impl EconomyConfig {
    /// Reads and validates a JSON config file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: EconomyConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`EconomyConfig::load`], logging and falling back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "using default economy config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.critical_chance) {
            return Err(ConfigError::Invalid(format!(
                "critical_chance must be within [0, 1], got {}",
                self.critical_chance
            )));
        }
        if !self.critical_multiplier.is_finite() || self.critical_multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "critical_multiplier must be >= 1, got {}",
                self.critical_multiplier
            )));
        }
        Ok(())
    }
}

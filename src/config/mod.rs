//! Configuration loading and management

mod io;
mod settings;

pub use io::DEFAULT_CONFIG;
pub use settings::{LevelSettings, MAX_LEVEL_LIMIT};

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::progress::{LevelTable, ProgressStore, StorePolicy};

/// Error type for invalid configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Level table generation
    #[serde(default)]
    pub levels: LevelSettings,

    /// Progress store guards
    #[serde(default)]
    pub store: StorePolicy,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for: .wayfarer/config.toml, then the global config
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = dir.join(".wayfarer/config.toml");
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Resolve the config for a run: an explicit path wins over discovery
    pub fn resolve(explicit: Option<&Path>, work_dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::from_dir(work_dir),
        }
    }

    /// Reject settings that cannot produce a usable level table
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.max_level == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "levels.max_level",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.levels.max_level > MAX_LEVEL_LIMIT {
            return Err(ConfigError::InvalidSetting {
                key: "levels.max_level",
                reason: format!("must be at most {}", MAX_LEVEL_LIMIT),
            });
        }

        if self.levels.exp_unit == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "levels.exp_unit",
                reason: "must be at least 1".to_string(),
            });
        }

        // Every level cost and reward is at most the table total
        if self.levels.total_exp().is_none() {
            return Err(ConfigError::InvalidSetting {
                key: "levels.exp_unit",
                reason: format!(
                    "total experience for {} levels overflows",
                    self.levels.max_level
                ),
            });
        }

        if self.levels.total_reward().is_none() {
            return Err(ConfigError::InvalidSetting {
                key: "levels.reward_unit",
                reason: format!(
                    "total reward for {} levels overflows",
                    self.levels.max_level
                ),
            });
        }

        Ok(())
    }

    /// Level table for these settings, sharing the process-wide default
    /// table when nothing was customized
    pub fn level_table(&self) -> Arc<LevelTable> {
        if self.levels == LevelSettings::default() {
            LevelTable::shared_default()
        } else {
            Arc::new(LevelTable::generate(&self.levels))
        }
    }

    /// An empty progress store configured from these settings
    pub fn build_store(&self) -> ProgressStore {
        ProgressStore::new(self.level_table(), self.store)
    }
}

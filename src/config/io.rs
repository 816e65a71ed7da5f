//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

/// Default configuration content for wayfarer init
pub const DEFAULT_CONFIG: &str = r#"# Wayfarer Configuration
# =======================

# ============================================================================
# LEVELS - Shape of the level table
# ============================================================================
#
# Level N costs N * exp_unit experience on top of the levels before it,
# and is worth N * reward_unit bonus points.
#
#   max_level   - Number of levels (default: 50)
#   exp_unit    - Experience multiplier per level (default: 1000)
#   reward_unit - Reward multiplier per level (default: 100)

[levels]
max_level = 50
exp_unit = 1000
reward_unit = 100

# ============================================================================
# STORE - Guards on progress updates
# ============================================================================
#
#   reject_duplicate_badges - Ignore a badge whose id is already unlocked (default: false)
#   idempotent_completion   - Only pay an achievement's reward once (default: false)

[store]
reject_duplicate_badges = false
idempotent_completion = false
"#;

impl Config {
    /// Get the global config directory path (~/.wayfarer/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wayfarer")
    }

    /// Get the global config file path (~/.wayfarer/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Save configuration to a file with atomic write and file locking.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, &content)
    }

    /// Write the commented default configuration to `path`
    pub fn write_default(path: &Path) -> Result<()> {
        write_locked(path, DEFAULT_CONFIG)
    }
}

/// Write `content` to `path` while holding an exclusive lock file.
///
/// The content goes to a temp file first and is renamed over `path`.
fn write_locked(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    // Separate from the config so the rename below does not drop the lock
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.levels.max_level = 12;
        config.store.reject_duplicate_badges = true;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("toml.tmp").exists());
    }
}

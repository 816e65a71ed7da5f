//! Init command implementation

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use wayfarer::config::Config;

/// Write the default configuration file
///
/// Defaults to `<work_dir>/.wayfarer/config.toml` unless a path is given.
pub fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = config_path.unwrap_or_else(|| work_dir.join(".wayfarer/config.toml"));

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::write_default(&path)?;
    info!("Wrote default config to {}", path.display());
    println!("Created {}", path.display());

    Ok(())
}

//! Init command implementation

use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;

use openclaw_manager::config::ManagerConfig;

/// Write the default manager config to `config_path`
pub fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    ManagerConfig::default().save_to_file(config_path)?;
    info!("[manager] Wrote {}", config_path.display());
    println!("Created {}", config_path.display());
    Ok(())
}

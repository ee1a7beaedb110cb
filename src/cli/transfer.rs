//! Export and import of the OpenClaw configuration

use std::path::Path;

use anyhow::Result;

use super::block_on;
use openclaw_manager::backend::{Backend, LocalBackend};

pub fn export_command(backend: &LocalBackend, dest: &Path) -> Result<()> {
    block_on(backend.export_config(dest))??;
    println!("Exported {} to {}", backend.config_path().display(), dest.display());
    Ok(())
}

pub fn import_command(backend: &LocalBackend, src: &Path) -> Result<()> {
    block_on(backend.import_config(src))??;
    println!("Imported {} into {}", src.display(), backend.config_path().display());
    println!("Restart the OpenClaw gateway to apply the new configuration.");
    Ok(())
}

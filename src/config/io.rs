//! Reading and writing `~/.openclaw-manager/config.toml`

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::debug;

use super::ManagerConfig;

impl ManagerConfig {
    /// `~/.openclaw-manager/`
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".openclaw-manager")
    }

    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid manager config {}", path.display()))
    }

    /// Missing file gives the defaults; an unreadable or malformed one is an error
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::from_file(path) {
            Ok(config) => Ok(config),
            Err(err) if is_not_found(&err) => {
                debug!("[config] {} absent, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    /// Write under an exclusive lock, replacing the file in one rename
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self).context("Cannot serialize manager config")?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
        }

        let _lock = lock_beside(path)?;
        replace_atomically(path, text.as_bytes())
            .with_context(|| format!("Cannot write {}", path.display()))?;
        debug!("[config] Saved {}", path.display());
        Ok(())
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == ErrorKind::NotFound)
}

/// Lock a sibling `<name>.lock`; the lock holds until the returned file drops
fn lock_beside(path: &Path) -> Result<File> {
    let lock_path = path.with_extension("toml.lock");
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("Cannot open {}", lock_path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Cannot lock {}", lock_path.display()))?;
    Ok(file)
}

fn replace_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let staged = path.with_extension("toml.tmp");
    {
        let mut file = File::create(&staged)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&staged, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ManagerConfig::default();
        config.openclaw_dir = Some(dir.path().join("claw"));
        config.gui.save_flash_ms = 500;
        config.save_to_file(&path).unwrap();

        let loaded = ManagerConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = ManagerConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, ManagerConfig::default());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "gui = 5").unwrap();
        assert!(ManagerConfig::load_or_default(&path).is_err());
    }
}

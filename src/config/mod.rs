//! Manager configuration loading and management
//!
//! This is the manager's own configuration (`~/.openclaw-manager/config.toml`),
//! not the OpenClaw document the panels edit.

mod io;
mod settings;

pub use settings::{GuiSettings, UninstallSettings, UpdateSettings};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// OpenClaw data directory holding `openclaw.json`.
    /// Defaults to `~/.openclaw` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openclaw_dir: Option<PathBuf>,

    /// Self-update settings
    #[serde(default)]
    pub update: UpdateSettings,

    /// What "uninstall everything" removes
    #[serde(default)]
    pub uninstall: UninstallSettings,

    /// GUI timing settings
    #[serde(default)]
    pub gui: GuiSettings,
}

impl ManagerConfig {
    /// Default OpenClaw data directory (~/.openclaw/)
    pub fn default_openclaw_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".openclaw")
    }

    /// Effective OpenClaw data directory
    pub fn openclaw_dir(&self) -> PathBuf {
        self.openclaw_dir
            .clone()
            .unwrap_or_else(Self::default_openclaw_dir)
    }

    /// Path of the OpenClaw configuration document
    pub fn openclaw_config_path(&self) -> PathBuf {
        self.openclaw_dir().join("openclaw.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: ManagerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ManagerConfig::default());
        assert_eq!(config.gui.save_flash_ms, 2000);
        assert_eq!(
            config.uninstall.cli_command,
            vec!["npm", "uninstall", "-g", "openclaw"]
        );
        assert!(config.uninstall.stop_gateway);
    }

    #[test]
    fn test_openclaw_dir_override() {
        let config: ManagerConfig = toml::from_str(
            r#"
            openclaw_dir = "/srv/claw"

            [uninstall]
            cli_command = []
            stop_gateway = false
            "#,
        )
        .unwrap();
        assert_eq!(
            config.openclaw_config_path(),
            PathBuf::from("/srv/claw/openclaw.json")
        );
        assert!(config.uninstall.cli_command.is_empty());
        assert!(!config.uninstall.stop_gateway);
    }
}

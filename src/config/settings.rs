//! Manager settings sections

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Self-update settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettings {
    /// GitHub repository (`owner/name`) whose releases are checked
    #[serde(default = "default_update_repo")]
    pub repo: String,

    /// Start an update check when the settings panel opens
    #[serde(default)]
    pub check_on_open: bool,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            repo: default_update_repo(),
            check_on_open: false,
        }
    }
}

fn default_update_repo() -> String {
    "openclaw/openclaw-manager".to_string()
}

/// Uninstall settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UninstallSettings {
    /// Command that removes the OpenClaw CLI. Empty skips the step.
    #[serde(default = "default_cli_command")]
    pub cli_command: Vec<String>,

    /// Stop processes holding the gateway port before removing files
    #[serde(default = "default_stop_gateway")]
    pub stop_gateway: bool,
}

impl Default for UninstallSettings {
    fn default() -> Self {
        Self {
            cli_command: default_cli_command(),
            stop_gateway: default_stop_gateway(),
        }
    }
}

fn default_cli_command() -> Vec<String> {
    ["npm", "uninstall", "-g", "openclaw"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_stop_gateway() -> bool {
    true
}

/// GUI timing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiSettings {
    /// How long the "Settings saved" confirmation stays visible
    #[serde(default = "default_save_flash_ms")]
    pub save_flash_ms: u64,

    /// Delay before the uninstall dialog closes after success
    #[serde(default = "default_uninstall_close_ms")]
    pub uninstall_close_ms: u64,
}

impl GuiSettings {
    pub fn save_flash(&self) -> Duration {
        Duration::from_millis(self.save_flash_ms)
    }

    pub fn uninstall_close_delay(&self) -> Duration {
        Duration::from_millis(self.uninstall_close_ms)
    }
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            save_flash_ms: default_save_flash_ms(),
            uninstall_close_ms: default_uninstall_close_ms(),
        }
    }
}

fn default_save_flash_ms() -> u64 {
    2000
}

fn default_uninstall_close_ms() -> u64 {
    1500
}

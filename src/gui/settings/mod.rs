//! Settings module for the GUI
//!
//! Renders the settings view where users can:
//! - Edit the browser, web, compaction, workspace, gateway and sub-agent slices
//! - Export or import the whole configuration
//! - Check for and install manager updates
//! - Uninstall OpenClaw

mod form;
mod helpers;
mod ops;
mod panel;
mod sections;
mod state;
mod uninstall;
mod update_flow;

pub use form::{COMMON_TIMEZONES, Field, FieldError, SettingsForm};
pub use ops::{load_all, save_all};
pub use panel::render_settings;
pub use state::{FileDialog, Flash, PanelEvent, SettingsPanel, SettingsPhase};
pub use uninstall::UninstallModal;
pub use update_flow::{DownloadProgress, UpdatePhase};

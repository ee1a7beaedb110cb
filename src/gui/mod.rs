//! GUI module for the OpenClaw manager
//!
//! Two panels share one backend:
//! - **Settings**: the six config slices, export/import, self-update, uninstall
//! - **Agents & Routing**: agent definitions and the bindings that route messages
//!
//! Backend calls never block the UI thread. They run on a tokio runtime and
//! each panel polls for finished results once per frame.

pub mod agents;
pub mod animations;
pub mod app;
mod app_eframe;
mod app_types;
pub mod path_prompt;
pub mod runner;
pub mod settings;
pub mod task;
pub mod theme;
pub mod toast;

pub use agents::AgentsPanel;
pub use app::{ManagerApp, ViewMode};
pub use runner::run_gui;
pub use settings::{PanelEvent, SettingsPanel};
pub use task::BackgroundTask;

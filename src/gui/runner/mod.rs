//! GUI runner - launches the manager window
//!
//! Owns the tokio runtime the panels spawn backend calls on.

mod fonts;

use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;

use super::app::ManagerApp;
use super::theme;
use crate::backend::{Backend, LocalBackend};
use crate::config::ManagerConfig;

use fonts::configure_fonts;

/// Run the manager GUI until the window closes
pub fn run_gui(config: ManagerConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("openclaw-backend")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let local = LocalBackend::new(&config);
    info!("[manager] Editing {}", local.config_path().display());
    let backend: Arc<dyn Backend> = Arc::new(local);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("OpenClaw Manager")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([720.0, 480.0])
            .with_decorations(true)
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "openclaw-manager",
        options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            theme::apply(&cc.egui_ctx);
            Ok(Box::new(ManagerApp::new(backend, handle, config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    // Let in-flight writes finish before the process exits
    runtime.shutdown_timeout(std::time::Duration::from_secs(2));
    Ok(())
}

//! Settings panel state and the backend calls it drives
//!
//! Everything here is UI-toolkit independent; `panel.rs` and `sections/`
//! only read this state and call the action methods.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tracing::{error, info, warn};

use super::form::SettingsForm;
use super::ops;
use super::uninstall::UninstallModal;
use super::update_flow::UpdatePhase;
use crate::backend::{Backend, ProgressSink};
use crate::config::ManagerConfig;
use crate::domain::{DownloadEvent, SettingsSnapshot, UninstallReport, UpdateInfo};
use crate::gui::path_prompt::PathPrompt;
use crate::gui::task::{BackgroundTask, take_finished};

/// Async phase of the panel's own load/save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsPhase {
    Loading,
    Ready,
    Saving,
}

/// Things the host app must react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// OpenClaw was removed from this machine
    EnvironmentChanged,
    /// The whole config was replaced; rebuild every panel
    ReloadRequested,
    /// A new instance was started; close this window
    CloseRequested,
}

/// Transient confirmation that expires on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub message: String,
    pub shown_at: Instant,
    pub expires_at: Instant,
}

/// Export/import dialogs, one at a time
#[derive(Debug, Clone)]
pub enum FileDialog {
    Export(PathPrompt),
    Import(PathPrompt),
    /// Import path chosen; waiting for the destructive-action confirmation
    ConfirmImport(PathBuf),
}

enum FileOutcome {
    Exported(PathBuf),
    Imported(PathBuf),
}

pub struct SettingsPanel {
    backend: Arc<dyn Backend>,
    runtime: Handle,
    save_flash: Duration,
    uninstall_close: Duration,

    phase: SettingsPhase,
    pub(super) form: SettingsForm,
    alert: Option<String>,
    flash: Option<Flash>,
    /// Inline result of export/import/stop-gateway
    status: Option<(String, bool)>,
    pub(super) file_dialog: Option<FileDialog>,
    update: UpdatePhase,
    uninstall: UninstallModal,
    pub(super) commonmark_cache: egui_commonmark::CommonMarkCache,

    load_task: Option<BackgroundTask<SettingsSnapshot>>,
    save_task: Option<BackgroundTask<()>>,
    file_task: Option<BackgroundTask<FileOutcome>>,
    stop_task: Option<BackgroundTask<String>>,
    check_task: Option<BackgroundTask<Option<UpdateInfo>>>,
    download_task: Option<BackgroundTask<()>>,
    progress_rx: Option<Receiver<DownloadEvent>>,
    relaunch_task: Option<BackgroundTask<()>>,
    uninstall_task: Option<BackgroundTask<UninstallReport>>,
}

impl SettingsPanel {
    /// Create the panel and start loading all six slices
    pub fn new(backend: Arc<dyn Backend>, runtime: Handle, config: &ManagerConfig) -> Self {
        let mut panel = Self {
            backend,
            runtime,
            save_flash: config.gui.save_flash(),
            uninstall_close: config.gui.uninstall_close_delay(),
            phase: SettingsPhase::Loading,
            form: SettingsForm::from_snapshot(&SettingsSnapshot::default()),
            alert: None,
            flash: None,
            status: None,
            file_dialog: None,
            update: UpdatePhase::Idle,
            uninstall: UninstallModal::Closed,
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            load_task: None,
            save_task: None,
            file_task: None,
            stop_task: None,
            check_task: None,
            download_task: None,
            progress_rx: None,
            relaunch_task: None,
            uninstall_task: None,
        };
        let backend = Arc::clone(&panel.backend);
        panel.load_task = Some(BackgroundTask::spawn(&panel.runtime, async move {
            Ok(ops::load_all(backend).await)
        }));
        if config.update.check_on_open {
            panel.check_for_update();
        }
        panel
    }

    pub fn phase(&self) -> SettingsPhase {
        self.phase
    }

    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SettingsForm {
        &mut self.form
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// The save confirmation, while it has not expired at `now`
    pub fn flash_at(&self, now: Instant) -> Option<&Flash> {
        self.flash.as_ref().filter(|f| now < f.expires_at)
    }

    pub fn status(&self) -> &Option<(String, bool)> {
        &self.status
    }

    pub fn update_phase(&self) -> &UpdatePhase {
        &self.update
    }

    pub fn uninstall_modal(&self) -> &UninstallModal {
        &self.uninstall
    }

    pub fn is_stopping_gateway(&self) -> bool {
        self.stop_task.is_some()
    }

    pub fn is_file_busy(&self) -> bool {
        self.file_task.is_some()
    }

    pub fn can_save(&self) -> bool {
        self.phase == SettingsPhase::Ready && self.alert.is_none() && self.form.is_valid()
    }

    /// Persist all six slices. Returns `false` when saving is not possible.
    pub fn save(&mut self) -> bool {
        if !self.can_save() {
            return false;
        }
        let Ok(snapshot) = self.form.to_snapshot() else {
            return false;
        };
        self.phase = SettingsPhase::Saving;
        self.flash = None;
        let backend = Arc::clone(&self.backend);
        self.save_task = Some(BackgroundTask::spawn(
            &self.runtime,
            ops::save_all(backend, snapshot),
        ));
        true
    }

    pub fn stop_gateway(&mut self) {
        if self.stop_task.is_some() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        self.stop_task = Some(BackgroundTask::spawn(&self.runtime, async move {
            backend.kill_all_port_processes().await
        }));
    }

    // === Export / import ===

    pub fn open_export_dialog(&mut self) {
        let name = format!(
            "openclaw-config-{}.json",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        let suggested = dirs::home_dir().map(|home| home.join(name));
        self.file_dialog = Some(FileDialog::Export(PathPrompt::new(
            "Export Configuration",
            "Export",
            suggested,
        )));
    }

    pub fn open_import_dialog(&mut self) {
        self.file_dialog = Some(FileDialog::Import(PathPrompt::new(
            "Import Configuration",
            "Import",
            None,
        )));
    }

    pub fn export_to(&mut self, dest: PathBuf) {
        if self.file_task.is_some() {
            return;
        }
        self.file_dialog = None;
        let backend = Arc::clone(&self.backend);
        self.file_task = Some(BackgroundTask::spawn(&self.runtime, async move {
            backend.export_config(&dest).await?;
            Ok(FileOutcome::Exported(dest))
        }));
    }

    /// Replace the whole configuration. Callers confirm with the user first.
    pub fn import_from(&mut self, src: PathBuf) {
        if self.file_task.is_some() {
            return;
        }
        self.file_dialog = None;
        let backend = Arc::clone(&self.backend);
        self.file_task = Some(BackgroundTask::spawn(&self.runtime, async move {
            backend.import_config(&src).await?;
            Ok(FileOutcome::Imported(src))
        }));
    }

    // === Self-update ===

    pub fn check_for_update(&mut self) {
        if !self.update.begin_check() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        self.check_task = Some(BackgroundTask::spawn(&self.runtime, async move {
            backend.check_for_update().await
        }));
    }

    pub fn install_update(&mut self) {
        let Some(info) = self.update.begin_download() else {
            return;
        };
        info!("[update] Installing v{}", info.version);
        let (tx, rx) = mpsc::channel();
        let sink: ProgressSink = Arc::new(move |event| {
            let _ = tx.send(event);
        });
        self.progress_rx = Some(rx);
        let backend = Arc::clone(&self.backend);
        self.download_task = Some(BackgroundTask::spawn(&self.runtime, async move {
            backend.download_and_install(&info, sink).await
        }));
    }

    /// Start the new build. Failures are only logged.
    pub fn relaunch(&mut self) {
        if !matches!(self.update, UpdatePhase::Done { .. }) || self.relaunch_task.is_some() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        self.relaunch_task = Some(BackgroundTask::spawn(&self.runtime, async move {
            backend.relaunch().await
        }));
    }

    // === Uninstall ===

    pub fn open_uninstall(&mut self) {
        self.uninstall.open();
    }

    pub fn cancel_uninstall(&mut self) {
        self.uninstall.cancel();
    }

    pub fn confirm_uninstall(&mut self) {
        if !self.uninstall.confirm() {
            return;
        }
        warn!("[settings] Uninstalling OpenClaw");
        let backend = Arc::clone(&self.backend);
        self.uninstall_task = Some(BackgroundTask::spawn(&self.runtime, async move {
            backend.uninstall_openclaw().await
        }));
    }

    // === Per-frame polling ===

    pub fn poll(&mut self) -> Vec<PanelEvent> {
        self.poll_at(Instant::now())
    }

    /// Collect finished backend calls and expire timers
    pub fn poll_at(&mut self, now: Instant) -> Vec<PanelEvent> {
        let mut events = Vec::new();

        if let Some(result) = take_finished(&mut self.load_task) {
            // load_all never fails; a lost task keeps the defaults
            match result {
                Ok(snapshot) => self.form = SettingsForm::from_snapshot(&snapshot),
                Err(e) => warn!("[settings] Load did not complete: {}", e),
            }
            self.phase = SettingsPhase::Ready;
        }

        if let Some(result) = take_finished(&mut self.save_task) {
            self.phase = SettingsPhase::Ready;
            match result {
                Ok(()) => {
                    self.flash = Some(Flash {
                        message: "Settings saved".to_string(),
                        shown_at: now,
                        expires_at: now + self.save_flash,
                    });
                }
                Err(e) => {
                    error!("[settings] Save failed: {}", e);
                    self.alert = Some(format!("Failed to save settings: {}", e));
                }
            }
        }
        if self.flash.as_ref().is_some_and(|f| now >= f.expires_at) {
            self.flash = None;
        }

        if let Some(result) = take_finished(&mut self.file_task) {
            match result {
                Ok(FileOutcome::Exported(path)) => {
                    self.status = Some((format!("Exported to {}", path.display()), false));
                }
                Ok(FileOutcome::Imported(path)) => {
                    info!("[settings] Imported {}, reloading", path.display());
                    events.push(PanelEvent::ReloadRequested);
                }
                Err(e) => self.status = Some((e.to_string(), true)),
            }
        }

        if let Some(result) = take_finished(&mut self.stop_task) {
            self.status = Some(match result {
                Ok(summary) => (summary, false),
                Err(e) => (format!("Failed to stop gateway: {}", e), true),
            });
        }

        if let Some(result) = take_finished(&mut self.check_task) {
            self.update.finish_check(result);
        }
        if let Some(rx) = &self.progress_rx {
            while let Ok(event) = rx.try_recv() {
                self.update.apply_event(event);
            }
        }
        if let Some(result) = take_finished(&mut self.download_task) {
            // Events sent just before the result
            if let Some(rx) = self.progress_rx.take() {
                while let Ok(event) = rx.try_recv() {
                    self.update.apply_event(event);
                }
            }
            if let Err(e) = &result {
                error!("[update] Install failed: {}", e);
            }
            self.update.finish_download(result);
        }
        if let Some(result) = take_finished(&mut self.relaunch_task) {
            match result {
                Ok(()) => events.push(PanelEvent::CloseRequested),
                Err(e) => error!("[update] Relaunch failed: {}", e),
            }
        }

        if let Some(result) = take_finished(&mut self.uninstall_task) {
            if self.uninstall.finish(result, now, self.uninstall_close) {
                events.push(PanelEvent::EnvironmentChanged);
            }
        }
        self.uninstall.tick(now);

        events
    }

    /// Any backend call still in flight
    pub fn is_busy(&self) -> bool {
        self.load_task.is_some()
            || self.save_task.is_some()
            || self.file_task.is_some()
            || self.stop_task.is_some()
            || self.check_task.is_some()
            || self.download_task.is_some()
            || self.relaunch_task.is_some()
            || self.uninstall_task.is_some()
    }
}

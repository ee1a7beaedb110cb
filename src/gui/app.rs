//! Main GUI application using egui
//!
//! A top navigation bar switches between the settings panel and the
//! agents/routing panel. Both panels talk to the same backend.

use std::sync::Arc;

use eframe::egui::{self, RichText};
use tokio::runtime::Handle;
use tracing::info;

pub use super::app_types::ViewMode;
use super::agents::AgentsPanel;
use super::animations::animated_button;
use super::settings::{PanelEvent, SettingsPanel};
use super::theme::{ACCENT_CYAN, BG_PRIMARY, BG_SECONDARY, TEXT_DIM, TEXT_MUTED};
use crate::backend::{Backend, CURRENT_VERSION};
use crate::config::ManagerConfig;

pub struct ManagerApp {
    backend: Arc<dyn Backend>,
    runtime: Handle,
    config: ManagerConfig,
    pub(super) view_mode: ViewMode,
    pub(super) settings: SettingsPanel,
    pub(super) agents: AgentsPanel,
}

impl ManagerApp {
    pub fn new(backend: Arc<dyn Backend>, runtime: Handle, config: ManagerConfig) -> Self {
        let settings = SettingsPanel::new(Arc::clone(&backend), runtime.clone(), &config);
        let agents = AgentsPanel::new(Arc::clone(&backend), runtime.clone());
        Self {
            backend,
            runtime,
            config,
            view_mode: ViewMode::default(),
            settings,
            agents,
        }
    }

    /// Drop the settings panel and fetch everything again
    fn rebuild_settings(&mut self) {
        self.settings =
            SettingsPanel::new(Arc::clone(&self.backend), self.runtime.clone(), &self.config);
    }

    fn rebuild_agents(&mut self) {
        self.agents = AgentsPanel::new(Arc::clone(&self.backend), self.runtime.clone());
    }

    pub(super) fn handle_panel_events(&mut self, ctx: &egui::Context, events: Vec<PanelEvent>) {
        for event in events {
            match event {
                PanelEvent::ReloadRequested => {
                    info!("[manager] Configuration replaced, reloading panels");
                    self.rebuild_settings();
                    self.rebuild_agents();
                }
                PanelEvent::EnvironmentChanged => {
                    info!("[manager] OpenClaw environment changed");
                    self.rebuild_agents();
                }
                PanelEvent::CloseRequested => {
                    info!("[manager] New instance started, closing");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    pub(super) fn render_nav(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("manager_nav")
            .frame(egui::Frame::NONE.fill(BG_SECONDARY).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("OPENCLAW").monospace().strong().color(ACCENT_CYAN));
                    ui.add_space(16.0);
                    for mode in ViewMode::ALL {
                        let color = if self.view_mode == mode {
                            ACCENT_CYAN
                        } else {
                            TEXT_DIM
                        };
                        if animated_button(ui, mode.label(), color, ("nav", mode.label()))
                            .clicked()
                        {
                            self.view_mode = mode;
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("v{}", CURRENT_VERSION))
                                .small()
                                .color(TEXT_MUTED),
                        );
                    });
                });
            });
    }

    pub(super) fn render_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BG_PRIMARY).inner_margin(16.0))
            .show(ctx, |ui| match self.view_mode {
                ViewMode::Settings => super::settings::render_settings(ui, &mut self.settings),
                ViewMode::Agents => super::agents::render_agents(ui, &mut self.agents),
            });
    }
}

//! Self-update section

use eframe::egui::{self, RichText};

use super::super::helpers::render_section;
use super::super::state::SettingsPanel;
use super::super::update_flow::UpdatePhase;
use crate::backend::CURRENT_VERSION;
use crate::gui::animations::{animated_button, animated_progress_bar, busy_label};
use crate::gui::theme::{
    ACCENT_CYAN, ACCENT_GREEN, ACCENT_PURPLE, ACCENT_RED, TEXT_DIM, TEXT_MUTED,
};

pub fn render_update_section(ui: &mut egui::Ui, panel: &mut SettingsPanel) {
    render_section(ui, "Updates", |ui| {
        ui.label(
            RichText::new(format!("Installed version: v{}", CURRENT_VERSION))
                .monospace()
                .color(TEXT_DIM),
        );
        ui.add_space(8.0);

        match panel.update_phase().clone() {
            UpdatePhase::Idle => {
                if animated_button(ui, "Check for updates", ACCENT_CYAN, "update_check").clicked() {
                    panel.check_for_update();
                }
            }
            UpdatePhase::Checking => {
                busy_label(ui, ACCENT_CYAN, "Checking for updates...");
            }
            UpdatePhase::UpToDate => {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("✓ You are on the latest version").color(ACCENT_GREEN));
                    if animated_button(ui, "Check again", TEXT_DIM, "update_recheck").clicked() {
                        panel.check_for_update();
                    }
                });
            }
            UpdatePhase::Available(info) => {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("v{} is available", info.version))
                            .color(ACCENT_PURPLE),
                    );
                    if !info.release_url.is_empty() {
                        ui.hyperlink_to(
                            RichText::new("Release page").small().color(TEXT_MUTED),
                            &info.release_url,
                        );
                    }
                });
                if let Some(body) = &info.body {
                    ui.add_space(6.0);
                    egui::Frame::NONE.inner_margin(8.0).show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .id_salt("update_changelog")
                            .max_height(180.0)
                            .show(ui, |ui| {
                                egui_commonmark::CommonMarkViewer::new().show(
                                    ui,
                                    &mut panel.commonmark_cache,
                                    body,
                                );
                            });
                    });
                }
                ui.add_space(6.0);
                if animated_button(ui, "Download and install", ACCENT_GREEN, "update_install")
                    .clicked()
                {
                    panel.install_update();
                }
            }
            UpdatePhase::Downloading { info, progress } => {
                ui.label(
                    RichText::new(format!(
                        "Downloading v{} ({} KiB)",
                        info.version,
                        progress.downloaded / 1024
                    ))
                        .color(TEXT_MUTED),
                );
                ui.add_space(4.0);
                animated_progress_bar(ui, progress.fraction(), ACCENT_CYAN, "update_progress");
            }
            UpdatePhase::Done { version } => {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("✓ v{} installed", version)).color(ACCENT_GREEN),
                    );
                    if animated_button(ui, "Restart now", ACCENT_GREEN, "update_relaunch").clicked()
                    {
                        panel.relaunch();
                    }
                });
            }
            UpdatePhase::Error(message) => {
                ui.label(RichText::new(format!("Update failed: {}", message)).color(ACCENT_RED));
                if animated_button(ui, "Try again", TEXT_DIM, "update_retry").clicked() {
                    panel.check_for_update();
                }
            }
        }
    });
}

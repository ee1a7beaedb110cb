//! Main settings panel rendering
//!
//! Contains the top-level render function for the settings view and the
//! dialogs layered over it.

use std::time::Instant;

use eframe::egui::{self, RichText, ScrollArea};

use super::sections::{
    render_browser_section, render_compaction_section, render_gateway_section,
    render_maintenance_section, render_subagents_section, render_update_section,
    render_web_section, render_workspace_section,
};
use super::state::{FileDialog, SettingsPanel, SettingsPhase};
use super::uninstall::UninstallModal;
use crate::gui::animations::{animated_button, busy_label, colored_spinner};
use crate::gui::path_prompt::PromptOutcome;
use crate::gui::theme::{
    ACCENT_CYAN, ACCENT_GREEN, ACCENT_RED, ACCENT_YELLOW, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::gui::toast::render_toast;

/// Render the settings view into `ui`
pub fn render_settings(ui: &mut egui::Ui, panel: &mut SettingsPanel) {
    let ctx = ui.ctx().clone();
    let blocked = panel.alert().is_some()
        || panel.file_dialog.is_some()
        || panel.uninstall_modal().is_open();
    let errors = panel.form().errors();

    ui.add_enabled_ui(!blocked, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("⚙ SETTINGS")
                    .monospace()
                    .size(18.0)
                    .color(TEXT_PRIMARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let saving = panel.phase() == SettingsPhase::Saving;
                ui.add_enabled_ui(panel.can_save(), |ui| {
                    let label = if saving { "Saving..." } else { "Save Settings" };
                    if animated_button(ui, label, ACCENT_GREEN, "settings_save").clicked() {
                        panel.save();
                    }
                });
                if saving {
                    colored_spinner(ui, ACCENT_GREEN, 14.0);
                } else if panel.phase() == SettingsPhase::Ready && !errors.is_empty() {
                    ui.label(
                        RichText::new("Fix the highlighted fields to save")
                            .small()
                            .color(ACCENT_RED),
                    );
                }
            });
        });
        ui.add_space(16.0);

        if panel.phase() == SettingsPhase::Loading {
            busy_label(ui, ACCENT_CYAN, "Loading settings...");
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                render_browser_section(ui, panel.form_mut());
                render_web_section(ui, panel.form_mut());
                render_compaction_section(ui, panel.form_mut(), &errors);
                render_workspace_section(ui, panel.form_mut(), &errors);
                render_gateway_section(ui, panel, &errors);
                render_subagents_section(ui, panel.form_mut(), &errors);
                render_update_section(ui, panel);
                render_maintenance_section(ui, panel);
            });
    });

    render_alert(&ctx, panel);
    render_file_dialog(&ctx, panel);
    render_uninstall_modal(&ctx, panel);

    if let Some(flash) = panel.flash_at(Instant::now()) {
        render_toast(
            &ctx,
            &flash.message,
            ACCENT_GREEN,
            flash.shown_at,
            flash.expires_at,
        );
    }
}

/// Save failures block the panel until acknowledged
fn render_alert(ctx: &egui::Context, panel: &mut SettingsPanel) {
    let Some(message) = panel.alert().map(String::from) else {
        return;
    };
    egui::Window::new("Save failed")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(message).color(ACCENT_RED));
            ui.add_space(4.0);
            ui.label(
                RichText::new("Your edits are still in the form.")
                    .small()
                    .color(TEXT_MUTED),
            );
            ui.add_space(12.0);
            if animated_button(ui, "OK", TEXT_PRIMARY, "settings_alert_ok").clicked() {
                panel.dismiss_alert();
            }
        });
}

fn render_file_dialog(ctx: &egui::Context, panel: &mut SettingsPanel) {
    let Some(dialog) = panel.file_dialog.as_mut() else {
        return;
    };
    match dialog {
        FileDialog::Export(prompt) => match prompt.show(ctx) {
            PromptOutcome::Pending => {}
            PromptOutcome::Cancelled => panel.file_dialog = None,
            PromptOutcome::Confirmed(path) => panel.export_to(path),
        },
        FileDialog::Import(prompt) => match prompt.show(ctx) {
            PromptOutcome::Pending => {}
            PromptOutcome::Cancelled => panel.file_dialog = None,
            PromptOutcome::Confirmed(path) => {
                panel.file_dialog = Some(FileDialog::ConfirmImport(path));
            }
        },
        FileDialog::ConfirmImport(path) => {
            let path = path.clone();
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new("Replace configuration?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(
                        RichText::new(format!(
                            "Importing {} overwrites the entire current configuration.",
                            path.display()
                        ))
                        .color(ACCENT_YELLOW),
                    );
                    ui.label(
                        RichText::new("Restart the gateway afterwards to apply it fully.")
                            .small()
                            .color(TEXT_MUTED),
                    );
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        if animated_button(ui, "Cancel", TEXT_DIM, "import_confirm_cancel")
                            .clicked()
                        {
                            cancelled = true;
                        }
                        if animated_button(ui, "Import and reload", ACCENT_RED, "import_confirm_ok")
                            .clicked()
                        {
                            confirmed = true;
                        }
                    });
                });
            if confirmed {
                panel.import_from(path);
            } else if cancelled {
                panel.file_dialog = None;
            }
        }
    }
}

fn render_uninstall_modal(ctx: &egui::Context, panel: &mut SettingsPanel) {
    if !panel.uninstall_modal().is_open() {
        return;
    }
    let modal = panel.uninstall_modal().clone();
    egui::Window::new("Uninstall OpenClaw")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            match &modal {
                UninstallModal::Confirming { report } => {
                    ui.label(
                        RichText::new(
                            "This permanently deletes the OpenClaw data directory, \
                             including agents, sessions and credentials, and removes the CLI.",
                        )
                        .color(ACCENT_YELLOW),
                    );
                    if let Some(report) = report {
                        ui.add_space(8.0);
                        ui.label(RichText::new(&report.message).color(ACCENT_RED));
                        if let Some(error) = &report.error {
                            ui.label(RichText::new(error).small().monospace().color(TEXT_MUTED));
                        }
                    }
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        if animated_button(ui, "Cancel", TEXT_DIM, "uninstall_cancel").clicked() {
                            panel.cancel_uninstall();
                        }
                        if animated_button(ui, "Uninstall everything", ACCENT_RED, "uninstall_confirm")
                            .clicked()
                        {
                            panel.confirm_uninstall();
                        }
                    });
                }
                UninstallModal::Running => {
                    busy_label(ui, ACCENT_RED, "Uninstalling...");
                }
                UninstallModal::Finished { report, .. } => {
                    ui.label(RichText::new(format!("✓ {}", report.message)).color(ACCENT_GREEN));
                }
                UninstallModal::Closed => {}
            }
        });
}

//! Export, import and uninstall

use eframe::egui::{self, RichText};

use super::super::helpers::{render_section, render_status_message};
use super::super::state::SettingsPanel;
use crate::gui::animations::{animated_button, colored_spinner};
use crate::gui::theme::{ACCENT_CYAN, ACCENT_RED, TEXT_MUTED};

pub fn render_maintenance_section(ui: &mut egui::Ui, panel: &mut SettingsPanel) {
    render_section(ui, "Configuration", |ui| {
        ui.horizontal(|ui| {
            let busy = panel.is_file_busy();
            ui.add_enabled_ui(!busy, |ui| {
                if animated_button(ui, "Export...", ACCENT_CYAN, "settings_export").clicked() {
                    panel.open_export_dialog();
                }
                if animated_button(ui, "Import...", ACCENT_CYAN, "settings_import").clicked() {
                    panel.open_import_dialog();
                }
            });
            if busy {
                colored_spinner(ui, ACCENT_CYAN, 14.0);
            }
        });
        ui.add_space(4.0);
        render_status_message(ui, panel.status());
    });

    render_section(ui, "Danger Zone", |ui| {
        ui.label(
            RichText::new("Remove the OpenClaw data directory and the openclaw CLI from this machine.")
                .small()
                .color(TEXT_MUTED),
        );
        ui.add_space(8.0);
        if animated_button(ui, "Uninstall OpenClaw...", ACCENT_RED, "settings_uninstall_open")
            .clicked()
        {
            panel.open_uninstall();
        }
    });
}

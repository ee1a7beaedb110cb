//! Gateway port and log level

use eframe::egui::{self, RichText};

use super::super::form::{Field, FieldError};
use super::super::helpers::{render_number_field, render_section};
use super::super::state::SettingsPanel;
use crate::domain::LogLevel;
use crate::gui::animations::{animated_button, colored_spinner};
use crate::gui::theme::{ACCENT_RED, ACCENT_YELLOW, TEXT_MUTED};

pub fn render_gateway_section(
    ui: &mut egui::Ui,
    panel: &mut SettingsPanel,
    errors: &[FieldError],
) {
    render_section(ui, "Gateway", |ui| {
        let form = panel.form_mut();
        let error = FieldError::lookup(errors, Field::GatewayPort);
        render_number_field(ui, "Port:", &mut form.gateway_port, "(1-65535)", error);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Log level:").color(TEXT_MUTED));
            egui::ComboBox::from_id_salt("settings_log_level")
                .selected_text(form.log_level.as_str().to_string())
                .show_ui(ui, |ui| {
                    let mut levels = LogLevel::ALL.to_vec();
                    if let LogLevel::Other(_) = form.log_level {
                        levels.push(form.log_level.clone());
                    }
                    for level in levels {
                        let label = level.as_str().to_string();
                        ui.selectable_value(&mut form.log_level, level, label);
                    }
                });
        });

        if form.gateway_changed() {
            ui.add_space(6.0);
            ui.label(
                RichText::new("⚠ Restart the gateway for port and log level changes to apply.")
                    .color(ACCENT_YELLOW),
            );
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let busy = panel.is_stopping_gateway();
            ui.add_enabled_ui(!busy, |ui| {
                if animated_button(ui, "Stop gateway processes", ACCENT_RED, "settings_stop_gateway")
                    .on_hover_text("Terminate every process listening on the gateway port")
                    .clicked()
                {
                    panel.stop_gateway();
                }
            });
            if busy {
                colored_spinner(ui, ACCENT_RED, 14.0);
            }
        });
    });
}

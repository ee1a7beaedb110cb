//! Workspace defaults

use eframe::egui::{self, RichText};

use super::super::form::{COMMON_TIMEZONES, Field, FieldError, SettingsForm};
use super::super::helpers::{
    render_checkbox_field, render_number_field, render_section, render_text_field,
};
use crate::domain::TimeFormat;
use crate::gui::theme::TEXT_MUTED;

fn time_format_label(format: Option<&TimeFormat>) -> String {
    match format {
        None => "default".to_string(),
        Some(format) => format.as_str().to_string(),
    }
}

pub fn render_workspace_section(
    ui: &mut egui::Ui,
    form: &mut SettingsForm,
    errors: &[FieldError],
) {
    render_section(ui, "Workspace", |ui| {
        render_text_field(
            ui,
            "Workspace:",
            &mut form.workspace,
            360.0,
            Some("~/.openclaw/workspace"),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Timezone:").color(TEXT_MUTED));
            ui.add(
                egui::TextEdit::singleline(&mut form.timezone)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(200.0)
                    .hint_text("system"),
            );
            egui::ComboBox::from_id_salt("settings_timezone")
                .selected_text("Pick...")
                .show_ui(ui, |ui| {
                    for zone in COMMON_TIMEZONES {
                        if ui
                            .selectable_label(form.timezone == *zone, *zone)
                            .clicked()
                        {
                            form.timezone = (*zone).to_string();
                        }
                    }
                });
        });
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Time format:").color(TEXT_MUTED));
            egui::ComboBox::from_id_salt("settings_time_format")
                .selected_text(time_format_label(form.time_format.as_ref()))
                .show_ui(ui, |ui| {
                    let mut options =
                        vec![None, Some(TimeFormat::TwelveHour), Some(TimeFormat::TwentyFourHour)];
                    if let Some(TimeFormat::Other(_)) = form.time_format {
                        options.push(form.time_format.clone());
                    }
                    for option in options {
                        let label = time_format_label(option.as_ref());
                        ui.selectable_value(&mut form.time_format, option, label);
                    }
                });
        });
        ui.add_space(8.0);

        render_checkbox_field(
            ui,
            &mut form.skip_bootstrap,
            "Skip bootstrap",
            "(do not inject workspace bootstrap files)",
        );
        let error = FieldError::lookup(errors, Field::BootstrapMaxChars);
        render_number_field(
            ui,
            "Bootstrap max chars:",
            &mut form.bootstrap_max_chars,
            "",
            error,
        );
    });
}

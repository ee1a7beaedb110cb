//! Compaction and context pruning

use eframe::egui;

use super::super::form::{Field, FieldError, SettingsForm};
use super::super::helpers::{render_checkbox_field, render_number_field, render_section};

pub fn render_compaction_section(
    ui: &mut egui::Ui,
    form: &mut SettingsForm,
    errors: &[FieldError],
) {
    render_section(ui, "Compaction", |ui| {
        render_checkbox_field(
            ui,
            &mut form.compaction_enabled,
            "Auto-compaction",
            "(summarize old turns when the context fills up)",
        );
        // Hidden, never cleared
        if form.compaction_enabled {
            ui.indent("compaction_threshold", |ui| {
                let error = FieldError::lookup(errors, Field::CompactionThreshold);
                render_number_field(
                    ui,
                    "Threshold (tokens):",
                    &mut form.compaction_threshold,
                    "",
                    error,
                );
            });
        }
        ui.add_space(8.0);

        render_checkbox_field(
            ui,
            &mut form.context_pruning,
            "Context pruning",
            "(drop the oldest messages instead of summarizing)",
        );
        if form.context_pruning {
            ui.indent("max_context_messages", |ui| {
                let error = FieldError::lookup(errors, Field::MaxContextMessages);
                render_number_field(
                    ui,
                    "Max messages:",
                    &mut form.max_context_messages,
                    "",
                    error,
                );
            });
        }
    });
}

//! Subagent limits

use eframe::egui;

use super::super::form::{Field, FieldError, SettingsForm};
use super::super::helpers::{render_number_field, render_section};

pub fn render_subagents_section(
    ui: &mut egui::Ui,
    form: &mut SettingsForm,
    errors: &[FieldError],
) {
    render_section(ui, "Subagents", |ui| {
        let error = FieldError::lookup(errors, Field::MaxSpawnDepth);
        render_number_field(
            ui,
            "Max spawn depth:",
            &mut form.max_spawn_depth,
            "(0-10)",
            error,
        );
        let error = FieldError::lookup(errors, Field::MaxChildrenPerAgent);
        render_number_field(
            ui,
            "Max children per agent:",
            &mut form.max_children_per_agent,
            "(0-50)",
            error,
        );
        let error = FieldError::lookup(errors, Field::MaxConcurrent);
        render_number_field(
            ui,
            "Max concurrent:",
            &mut form.max_concurrent,
            "(0-100)",
            error,
        );
    });
}

//! Field widgets shared by the settings sections

use eframe::egui::{self, RichText};

use crate::gui::theme::{
    ACCENT_GREEN, ACCENT_RED, BG_SECONDARY, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY,
};

const LABEL_WIDTH: f32 = 170.0;

/// Fixed-width caption so the inputs of a section line up
fn field_row(ui: &mut egui::Ui, label: &str, add_input: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [LABEL_WIDTH, 18.0],
            egui::Label::new(RichText::new(label).color(TEXT_MUTED)),
        );
        add_input(ui);
    });
}

fn monospace_edit(value: &mut String, width: f32) -> egui::TextEdit<'_> {
    egui::TextEdit::singleline(value)
        .font(egui::TextStyle::Monospace)
        .desired_width(width)
}

pub fn render_text_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    width: f32,
    hint: Option<&str>,
) {
    field_row(ui, label, |ui| {
        ui.add(
            monospace_edit(value, width)
                .text_color(TEXT_PRIMARY)
                .hint_text(hint.unwrap_or_default()),
        );
    });
}

/// Optional integer input. Empty means "use the OpenClaw default"; an invalid
/// entry turns red and its message is shown under the row.
pub fn render_number_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    description: &str,
    error: Option<String>,
) {
    let color = if error.is_some() { ACCENT_RED } else { TEXT_PRIMARY };
    field_row(ui, label, |ui| {
        ui.add(monospace_edit(value, 90.0).text_color(color).hint_text("default"));
        if !description.is_empty() {
            ui.label(RichText::new(description).small().color(TEXT_MUTED));
        }
    });
    if let Some(message) = error {
        ui.horizontal(|ui| {
            ui.add_space(LABEL_WIDTH);
            ui.label(RichText::new(message).small().color(ACCENT_RED));
        });
    }
}

pub fn render_checkbox_field(ui: &mut egui::Ui, value: &mut bool, label: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.checkbox(value, RichText::new(label).color(TEXT_DIM));
        ui.label(RichText::new(description).small().color(TEXT_MUTED));
    });
}

/// `(message, is_error)` line under the export/import buttons
pub fn render_status_message(ui: &mut egui::Ui, status: &Option<(String, bool)>) {
    let Some((message, is_error)) = status else {
        return;
    };
    let (icon, color) = if *is_error { ("✗", ACCENT_RED) } else { ("✓", ACCENT_GREEN) };
    ui.label(RichText::new(format!("{} {}", icon, message)).color(color));
}

/// Section title followed by a framed body
pub fn render_section<R>(
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    ui.label(
        RichText::new(title.to_uppercase())
            .monospace()
            .strong()
            .color(TEXT_PRIMARY),
    );
    ui.add_space(6.0);
    let body = egui::Frame::NONE
        .fill(BG_SECONDARY)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        });
    ui.add_space(18.0);
    body.inner
}

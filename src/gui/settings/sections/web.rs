//! Web search section

use eframe::egui::{self, RichText};

use super::super::form::SettingsForm;
use super::super::helpers::render_section;
use crate::gui::theme::{TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY};

pub fn render_web_section(ui: &mut egui::Ui, form: &mut SettingsForm) {
    render_section(ui, "Web Search", |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Brave API key:").color(TEXT_MUTED));
            ui.add(
                egui::TextEdit::singleline(&mut form.brave_api_key)
                    .password(!form.show_api_key)
                    .font(egui::TextStyle::Monospace)
                    .text_color(TEXT_PRIMARY)
                    .desired_width(320.0)
                    .hint_text("BSA..."),
            );
            let toggle = if form.show_api_key { "Hide" } else { "Show" };
            if ui
                .small_button(RichText::new(toggle).color(TEXT_DIM))
                .clicked()
            {
                form.show_api_key = !form.show_api_key;
            }
        });
        ui.label(
            RichText::new("Leave empty to disable the web_search tool.")
                .small()
                .color(TEXT_MUTED),
        );
    });
}

//! Browser section

use eframe::egui::{self, Color32, RichText};

use super::super::form::SettingsForm;
use super::super::helpers::{render_checkbox_field, render_section, render_text_field};
use crate::gui::theme::TEXT_MUTED;

/// Parse `#rrggbb` for the color swatch
fn parse_hex(value: &str) -> Option<Color32> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn render_browser_section(ui: &mut egui::Ui, form: &mut SettingsForm) {
    render_section(ui, "Browser", |ui| {
        render_checkbox_field(
            ui,
            &mut form.browser_enabled,
            "Enable browser",
            "(lets agents open and drive a browser profile)",
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            render_text_field(
                ui,
                "Profile color:",
                &mut form.browser_color,
                100.0,
                Some("#ff4500"),
            );
            match parse_hex(&form.browser_color) {
                Some(color) => {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 3.0, color);
                }
                None if !form.browser_color.trim().is_empty() => {
                    ui.label(RichText::new("(not a hex color)").small().color(TEXT_MUTED));
                }
                None => {}
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FF4500"), Some(Color32::from_rgb(255, 69, 0)));
        assert_eq!(parse_hex("ff4500"), None);
        assert_eq!(parse_hex("#ff45"), None);
        assert_eq!(parse_hex("#gg0000"), None);
    }
}

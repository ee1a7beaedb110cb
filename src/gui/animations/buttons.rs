//! Accent buttons

use eframe::egui::{self, Color32, Id, Response, RichText, Stroke, Ui};

const GLOW_SECONDS: f32 = 0.15;

/// Text button tinted with `accent` that fades in a fill and outline on hover.
///
/// Hover is sampled from the previous frame (the response only exists after
/// the button is added), so the glow trails the pointer by one frame. Inside a
/// disabled `Ui` the glow stays off.
pub fn animated_button(
    ui: &mut Ui,
    text: impl Into<RichText>,
    accent: Color32,
    id_salt: impl std::hash::Hash,
) -> Response {
    let id = Id::new(id_salt);
    let hover_key = id.with("hovered");
    let hovered_before = ui.ctx().data(|d| d.get_temp::<bool>(hover_key)).unwrap_or(false);
    let glow = ui.ctx().animate_bool_with_time(
        id.with("glow"),
        hovered_before && ui.is_enabled(),
        GLOW_SECONDS,
    );

    let response = ui.add(
        egui::Button::new(text.into().color(accent))
            .fill(accent.gamma_multiply(0.16 * glow))
            .stroke(Stroke::new(1.0, accent.gamma_multiply(0.6 * glow))),
    );

    let hovered = response.hovered();
    if hovered != hovered_before {
        ui.ctx().data_mut(|d| d.insert_temp(hover_key, hovered));
        ui.ctx().request_repaint();
    }
    response
}

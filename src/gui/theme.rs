//! Palette for the manager window
//!
//! Dark slate surfaces with warm text. Accents carry meaning: cyan for
//! neutral actions, green for success, red for destructive actions and errors,
//! yellow for warnings and purple for release information.

use eframe::egui::{self, Color32, CornerRadius, Stroke};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(17, 19, 26);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(26, 29, 39);
/// Hovered list rows and the active nav tab
pub const BG_HIGHLIGHT: Color32 = Color32::from_rgb(38, 43, 58);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 226, 204);
pub const TEXT_DIM: Color32 = Color32::from_rgb(190, 170, 140);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(118, 112, 104);

pub const ACCENT_CYAN: Color32 = Color32::from_rgb(72, 210, 220);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(110, 220, 130);
pub const ACCENT_RED: Color32 = Color32::from_rgb(240, 90, 70);
pub const ACCENT_PURPLE: Color32 = Color32::from_rgb(180, 140, 250);
pub const ACCENT_YELLOW: Color32 = Color32::from_rgb(245, 195, 80);

/// Install the palette into egui's visuals
pub fn apply(ctx: &egui::Context) {
    ctx.style_mut(|style| {
        let visuals = &mut style.visuals;
        visuals.dark_mode = true;
        visuals.panel_fill = BG_PRIMARY;
        visuals.window_fill = BG_SECONDARY;
        visuals.window_stroke = Stroke::new(1.0, BG_HIGHLIGHT);
        visuals.window_corner_radius = CornerRadius::same(8);
        visuals.extreme_bg_color = BG_PRIMARY;
        visuals.override_text_color = Some(TEXT_PRIMARY);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BG_HIGHLIGHT);
        visuals.widgets.inactive.weak_bg_fill = BG_SECONDARY;
        visuals.widgets.hovered.weak_bg_fill = BG_HIGHLIGHT;
        visuals.selection.bg_fill = ACCENT_CYAN.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, ACCENT_CYAN);
    });
}

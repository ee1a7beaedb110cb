//! Small animated widgets shared by both panels

mod buttons;
mod indicators;

pub use buttons::animated_button;
pub use indicators::{animated_progress_bar, busy_label, colored_spinner};

use eframe::egui::Color32;

/// Blend from `from` to `to`; `t` is clamped to 0.0..=1.0
pub fn lerp_color(from: Color32, to: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    Color32::from_rgba_unmultiplied(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
        mix(from.a(), to.a()),
    )
}

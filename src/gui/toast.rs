//! Transient confirmation toast
//!
//! Fades in, stays for its lifetime, fades out. The caller owns the timing;
//! this only draws.

use std::time::Instant;

use eframe::egui::{self, Align2, Color32, Id, RichText, Vec2};

use crate::gui::theme::BG_SECONDARY;

/// Animation duration for fade in/out
const FADE_DURATION: f32 = 0.3;

/// Opacity for a toast shown at `shown_at` that disappears at `expires_at`
fn toast_alpha(shown_at: Instant, expires_at: Instant, now: Instant) -> f32 {
    let lifetime = expires_at.saturating_duration_since(shown_at).as_secs_f32();
    let elapsed = now.saturating_duration_since(shown_at).as_secs_f32();
    if elapsed >= lifetime {
        return 0.0;
    }
    let fade = FADE_DURATION.min(lifetime / 2.0);
    if elapsed < fade {
        elapsed / fade
    } else if elapsed > lifetime - fade {
        (lifetime - elapsed) / fade
    } else {
        1.0
    }
}

pub fn render_toast(
    ctx: &egui::Context,
    message: &str,
    color: Color32,
    shown_at: Instant,
    expires_at: Instant,
) {
    let alpha = toast_alpha(shown_at, expires_at, Instant::now());
    let animated_alpha = ctx.animate_value_with_time(Id::new("flash_toast_alpha"), alpha, 0.1);

    egui::Area::new(Id::new("flash_toast"))
        .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-20.0, -20.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let bg_color = Color32::from_rgba_unmultiplied(
                BG_SECONDARY.r(),
                BG_SECONDARY.g(),
                BG_SECONDARY.b(),
                (animated_alpha * 240.0) as u8,
            );

            egui::Frame::NONE
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, apply_alpha(color, animated_alpha * 0.6)))
                .corner_radius(8.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(message)
                            .color(apply_alpha(color, animated_alpha))
                            .strong(),
                    );
                });
        });

    // Keep repainting for animation
    ctx.request_repaint();
}

/// Apply alpha to a color
fn apply_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * alpha.clamp(0.0, 1.0)) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_toast_alpha_fades() {
        let start = Instant::now();
        let end = start + Duration::from_secs(2);
        assert_eq!(toast_alpha(start, end, start), 0.0);
        assert_eq!(toast_alpha(start, end, start + Duration::from_secs(1)), 1.0);
        assert!(toast_alpha(start, end, end - Duration::from_millis(100)) < 0.5);
        assert_eq!(toast_alpha(start, end, end), 0.0);
    }
}

//! Busy and progress indicators for in-flight backend calls

use std::f32::consts::TAU;

use eframe::egui::{Color32, Id, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui, Vec2};

/// Rotating three-quarter arc, `size` points square
pub fn colored_spinner(ui: &mut Ui, color: Color32, size: f32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let time = ui.ctx().input(|i| i.time) as f32;
    let head = time * 5.0;
    let radius = size * 0.38;
    let center = rect.center();
    let points: Vec<Pos2> = (0..=24)
        .map(|step| {
            let angle = head - 0.75 * TAU * (step as f32 / 24.0);
            center + radius * Vec2::angled(angle)
        })
        .collect();

    ui.painter()
        .add(Shape::line(points, Stroke::new(size * 0.12, color)));
    ui.ctx().request_repaint();
}

/// Spinner followed by a muted caption, e.g. "Saving..."
pub fn busy_label(ui: &mut Ui, color: Color32, caption: &str) {
    ui.horizontal(|ui| {
        colored_spinner(ui, color, 14.0);
        ui.label(RichText::new(caption).color(color.gamma_multiply(0.8)));
    });
}

/// Download bar that eases toward `fraction` (0.0..=1.0) and prints the
/// percentage on top of the track.
pub fn animated_progress_bar(
    ui: &mut Ui,
    fraction: f32,
    color: Color32,
    id_salt: impl std::hash::Hash,
) {
    let shown = ui
        .ctx()
        .animate_value_with_time(Id::new(id_salt), fraction.clamp(0.0, 1.0), 0.25);

    let (rect, _) =
        ui.allocate_exact_size(Vec2::new(ui.available_width(), 14.0), Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 3.0, color.gamma_multiply(0.15));
    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(rect.width() * shown, rect.height())),
        3.0,
        color,
    );
    painter.text(
        rect.center(),
        eframe::egui::Align2::CENTER_CENTER,
        format!("{:.0}%", shown * 100.0),
        eframe::egui::FontId::monospace(10.0),
        Color32::WHITE,
    );
}

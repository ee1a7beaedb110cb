//! eframe::App implementation for ManagerApp
//!
//! Contains the main update loop that runs every frame.

use std::time::Duration;

use eframe::egui;

use super::app::ManagerApp;

impl eframe::App for ManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Collect finished backend calls before drawing
        let events = self.settings.poll();
        self.agents.poll();
        self.handle_panel_events(ctx, events);

        self.render_nav(ctx);
        self.render_view(ctx);

        // Results arrive off-thread; keep polling while anything is in flight
        if self.settings.is_busy() || self.agents.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

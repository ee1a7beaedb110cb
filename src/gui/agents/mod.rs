//! Agents and routing component for the GUI
//!
//! Renders the agents view where users can:
//! - List agents and the bindings that route messages to them
//! - Create and edit agents
//! - Add bindings with a channel, account and peer match
//! - Delete agents and bindings after confirming

mod editor;
mod list;
mod persistence;
mod state;

pub use persistence::Mutation;
pub use state::{
    AgentForm, AgentsDialog, AgentsPanel, AgentsPhase, BindingForm, EditMode, PendingDelete,
};

use eframe::egui::{self, RichText, ScrollArea};

use super::animations::colored_spinner;
use super::theme::{ACCENT_CYAN, TEXT_MUTED, TEXT_PRIMARY};

/// Render the agents view into `ui`
pub fn render_agents(ui: &mut egui::Ui, panel: &mut AgentsPanel) {
    let ctx = ui.ctx().clone();
    let blocked = panel.dialog().is_some();

    ui.add_enabled_ui(!blocked, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("AGENTS & ROUTING")
                    .monospace()
                    .size(18.0)
                    .color(TEXT_PRIMARY),
            );
            if panel.is_busy() {
                colored_spinner(ui, ACCENT_CYAN, 14.0);
            }
        });
        ui.add_space(16.0);

        if panel.phase() == AgentsPhase::Loading {
            ui.label(RichText::new("Loading agents...").color(TEXT_MUTED));
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| list::render_agents_list(ui, panel));
    });

    editor::render_dialog(&ctx, panel);
}

//! Agent and binding list rendering

use eframe::egui::{self, RichText};

use super::state::AgentsPanel;
use crate::gui::animations::{animated_button, lerp_color};
use crate::gui::theme::{
    ACCENT_CYAN, ACCENT_PURPLE, ACCENT_RED, BG_HIGHLIGHT, BG_SECONDARY, TEXT_DIM, TEXT_MUTED,
    TEXT_PRIMARY,
};

enum RowAction {
    Edit(String),
    DeleteAgent(String),
    DeleteBinding(usize),
}

/// Framed row whose background brightens on hover
fn hover_row(
    ui: &mut egui::Ui,
    id_salt: impl std::hash::Hash,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    let id = ui.id().with(id_salt);
    let hovered = ui.ctx().data(|d| d.get_temp::<bool>(id)).unwrap_or(false);
    let t = ui.ctx().animate_bool_with_time(id.with("anim"), hovered, 0.15);

    let response = egui::Frame::NONE
        .fill(lerp_color(BG_SECONDARY, BG_HIGHLIGHT, t))
        .corner_radius(4.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        })
        .response;
    let now_hovered = response.hovered();
    ui.ctx().data_mut(|d| d.insert_temp(id, now_hovered));
    ui.add_space(4.0);
}

pub fn render_agents_list(ui: &mut egui::Ui, panel: &mut AgentsPanel) {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Agents").monospace().color(TEXT_PRIMARY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if animated_button(ui, "+ New Agent", ACCENT_CYAN, "agents_new_btn").clicked() {
                panel.open_create_agent();
            }
        });
    });
    ui.add_space(8.0);

    if panel.agents().is_empty() {
        ui.label(RichText::new("No agents configured.").color(TEXT_MUTED));
    }
    for agent in panel.agents() {
        hover_row(ui, ("agent_row", &agent.id), |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&agent.id).monospace().color(ACCENT_CYAN));
                if let Some(model) = &agent.model {
                    ui.label(RichText::new(model).small().color(TEXT_DIM));
                }
                if agent.sandbox == Some(true) {
                    ui.label(RichText::new("sandbox").small().color(ACCENT_PURPLE));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if animated_button(ui, "Delete", ACCENT_RED, ("agent_delete", &agent.id))
                        .clicked()
                    {
                        action = Some(RowAction::DeleteAgent(agent.id.clone()));
                    }
                    if animated_button(ui, "Edit", TEXT_DIM, ("agent_edit", &agent.id)).clicked() {
                        action = Some(RowAction::Edit(agent.id.clone()));
                    }
                });
            });
            if let Some(workspace) = &agent.workspace {
                ui.label(RichText::new(workspace).small().monospace().color(TEXT_MUTED));
            }
        });
    }

    ui.add_space(20.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Routing Bindings").monospace().color(TEXT_PRIMARY));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let has_agents = !panel.agents().is_empty();
            ui.add_enabled_ui(has_agents, |ui| {
                let response =
                    animated_button(ui, "+ New Binding", ACCENT_CYAN, "bindings_new_btn")
                        .on_disabled_hover_text("Create an agent first");
                if response.clicked() {
                    panel.open_add_binding();
                }
            });
        });
    });
    ui.add_space(8.0);

    if panel.bindings().is_empty() {
        ui.label(
            RichText::new("No bindings. Messages go to the default agent.").color(TEXT_MUTED),
        );
    }
    for (index, binding) in panel.bindings().iter().enumerate() {
        hover_row(ui, ("binding_row", index), |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("#{}", index + 1)).small().color(TEXT_MUTED));
                ui.label(RichText::new(&binding.agent_id).monospace().color(ACCENT_CYAN));
                ui.label(RichText::new("<-").color(TEXT_MUTED));
                ui.label(RichText::new(binding.match_rule.summary()).small().color(TEXT_DIM));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if animated_button(ui, "Delete", ACCENT_RED, ("binding_delete", index))
                        .clicked()
                    {
                        action = Some(RowAction::DeleteBinding(index));
                    }
                });
            });
        });
    }

    match action {
        Some(RowAction::Edit(id)) => panel.open_edit_agent(&id),
        Some(RowAction::DeleteAgent(id)) => panel.request_delete_agent(&id),
        Some(RowAction::DeleteBinding(index)) => panel.request_delete_binding(index),
        None => {}
    }
}

//! Agent, binding and delete-confirmation dialogs

use eframe::egui::{self, RichText};

use super::state::{AgentForm, AgentsDialog, AgentsPanel, BindingForm, EditMode};
use crate::domain::{AgentInfo, PeerKind};
use crate::gui::animations::{animated_button, colored_spinner};
use crate::gui::theme::{
    ACCENT_CYAN, ACCENT_GREEN, ACCENT_RED, ACCENT_YELLOW, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY,
};

enum DialogAction {
    Submit,
    Close,
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 18.0],
            egui::Label::new(RichText::new(label).color(TEXT_MUTED)),
        );
        ui.add(
            egui::TextEdit::singleline(value)
                .font(egui::TextStyle::Monospace)
                .text_color(TEXT_PRIMARY)
                .desired_width(280.0)
                .hint_text(hint),
        );
    });
}

fn sandbox_label(value: Option<bool>) -> &'static str {
    match value {
        None => "default",
        Some(true) => "on",
        Some(false) => "off",
    }
}

fn agent_form_body(ui: &mut egui::Ui, form: &mut AgentForm) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 18.0],
            egui::Label::new(RichText::new("ID:").color(TEXT_MUTED)),
        );
        ui.add_enabled(
            form.id_editable(),
            egui::TextEdit::singleline(&mut form.id)
                .font(egui::TextStyle::Monospace)
                .desired_width(280.0)
                .hint_text("required"),
        );
    });
    text_row(ui, "Workspace:", &mut form.workspace, "inherit default");
    text_row(ui, "Agent dir:", &mut form.agent_dir, "inherit default");
    text_row(ui, "Model:", &mut form.model, "provider/model");
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 18.0],
            egui::Label::new(RichText::new("Sandbox:").color(TEXT_MUTED)),
        );
        egui::ComboBox::from_id_salt("agent_sandbox")
            .selected_text(sandbox_label(form.sandbox))
            .show_ui(ui, |ui| {
                for option in [None, Some(true), Some(false)] {
                    ui.selectable_value(&mut form.sandbox, option, sandbox_label(option));
                }
            });
    });
}

fn binding_form_body(ui: &mut egui::Ui, form: &mut BindingForm, agents: &[AgentInfo]) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 18.0],
            egui::Label::new(RichText::new("Agent:").color(TEXT_MUTED)),
        );
        egui::ComboBox::from_id_salt("binding_agent")
            .selected_text(RichText::new(&form.agent_id).monospace())
            .show_ui(ui, |ui| {
                for agent in agents {
                    ui.selectable_value(&mut form.agent_id, agent.id.clone(), agent.id.as_str());
                }
            });
    });
    text_row(ui, "Channel:", &mut form.channel, "any channel");
    text_row(ui, "Account ID:", &mut form.account_id, "any account");

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 18.0],
            egui::Label::new(RichText::new("Peer:").color(TEXT_MUTED)),
        );
        for kind in PeerKind::ALL {
            if ui.radio(form.peer_kind() == kind, kind.label()).clicked() {
                form.set_peer_kind(kind);
            }
        }
    });
    if form.peer_kind() != PeerKind::Any {
        text_row(ui, "Peer ID:", &mut form.peer_id, "required");
    }
    if let Some(binding) = form.to_binding() {
        ui.label(
            RichText::new(format!("Routes {}", binding.match_rule.summary()))
                .small()
                .color(TEXT_DIM),
        );
    }
}

fn dialog_footer(
    ui: &mut egui::Ui,
    can_submit: bool,
    busy: bool,
    label: &str,
    color: egui::Color32,
) -> Option<DialogAction> {
    let mut action = None;
    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.add_enabled_ui(!busy, |ui| {
            if animated_button(ui, "Cancel", TEXT_DIM, "agents_dialog_cancel").clicked() {
                action = Some(DialogAction::Close);
            }
        });
        ui.add_enabled_ui(can_submit, |ui| {
            if animated_button(ui, label, color, "agents_dialog_submit").clicked() {
                action = Some(DialogAction::Submit);
            }
        });
        if busy {
            colored_spinner(ui, color, 14.0);
        }
    });
    action
}

/// Render whichever dialog is open
pub fn render_dialog(ctx: &egui::Context, panel: &mut AgentsPanel) {
    let can_submit = panel.can_submit();
    let busy = panel.pending_mutation();
    let error = panel.dialog_error().map(String::from);
    let agents = panel.agents().to_vec();
    let Some(dialog) = panel.dialog_mut() else {
        return;
    };

    let (title, label, color) = match &*dialog {
        AgentsDialog::Agent(form) if form.mode() == EditMode::Edit => {
            ("Edit Agent", "Save", ACCENT_GREEN)
        }
        AgentsDialog::Agent(_) => ("New Agent", "Create", ACCENT_GREEN),
        AgentsDialog::Binding(_) => ("New Binding", "Add", ACCENT_CYAN),
        AgentsDialog::ConfirmDelete(_) => ("Confirm Delete", "Delete", ACCENT_RED),
    };

    let mut action = None;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            match dialog {
                AgentsDialog::Agent(form) => agent_form_body(ui, form),
                AgentsDialog::Binding(form) => binding_form_body(ui, form, &agents),
                AgentsDialog::ConfirmDelete(pending) => {
                    ui.label(RichText::new(pending.prompt()).color(ACCENT_YELLOW));
                }
            }
            if let Some(error) = &error {
                ui.add_space(8.0);
                ui.label(RichText::new(error).color(ACCENT_RED));
            }
            action = dialog_footer(ui, can_submit, busy, label, color);
        });

    match action {
        Some(DialogAction::Submit) => {
            panel.submit();
        }
        Some(DialogAction::Close) => panel.close_dialog(),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_labels() {
        assert_eq!(sandbox_label(None), "default");
        assert_eq!(sandbox_label(Some(true)), "on");
        assert_eq!(sandbox_label(Some(false)), "off");
    }
}

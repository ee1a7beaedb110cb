//! In-app file picker used for config export and import

use std::path::PathBuf;

use eframe::egui::{self, RichText};

use super::animations::animated_button;
use super::theme::{ACCENT_GREEN, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY};

/// What the user did with the prompt this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Confirmed(PathBuf),
    Cancelled,
}

impl PromptOutcome {
    /// `Some(path)` on confirm, `None` on cancel
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            PromptOutcome::Confirmed(path) => Some(path),
            _ => None,
        }
    }
}

/// Modal asking for a file path
#[derive(Debug, Clone)]
pub struct PathPrompt {
    title: &'static str,
    action: &'static str,
    pub path: String,
}

impl PathPrompt {
    pub fn new(title: &'static str, action: &'static str, suggested: Option<PathBuf>) -> Self {
        Self {
            title,
            action,
            path: suggested
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// The entered path, if it is not blank
    pub fn current(&self) -> Option<PathBuf> {
        let trimmed = self.path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    pub fn show(&mut self, ctx: &egui::Context) -> PromptOutcome {
        let mut outcome = PromptOutcome::Pending;
        egui::Window::new(self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new("File path:").color(TEXT_MUTED));
                ui.add(
                    egui::TextEdit::singleline(&mut self.path)
                        .font(egui::TextStyle::Monospace)
                        .text_color(TEXT_PRIMARY)
                        .desired_width(420.0),
                );
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if animated_button(ui, "Cancel", TEXT_DIM, ("path_prompt_cancel", self.title))
                        .clicked()
                    {
                        outcome = PromptOutcome::Cancelled;
                    }
                    let path = self.current();
                    ui.add_enabled_ui(path.is_some(), |ui| {
                        if animated_button(ui, self.action, ACCENT_GREEN, ("path_prompt_ok", self.title))
                            .clicked()
                        {
                            if let Some(path) = path {
                                outcome = PromptOutcome::Confirmed(path);
                            }
                        }
                    });
                });
            });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_path_is_not_a_selection() {
        let mut prompt = PathPrompt::new("Import", "Import", None);
        assert_eq!(prompt.current(), None);
        prompt.path = "  /tmp/openclaw.json ".into();
        assert_eq!(prompt.current(), Some(PathBuf::from("/tmp/openclaw.json")));
        assert_eq!(PromptOutcome::Cancelled.into_path(), None);
    }
}

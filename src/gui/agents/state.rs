//! Agents panel state: the fetched snapshot, the open dialog and in-flight calls

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{error, warn};

use super::persistence::{Mutation, apply_mutation, load_agents};
use crate::backend::Backend;
use crate::domain::{AgentBinding, AgentInfo, AgentsConfig, MatchRule, PeerKind, PeerMatch};
use crate::gui::task::{BackgroundTask, take_finished};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentsPhase {
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit,
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Create/edit dialog for one agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentForm {
    mode: EditMode,
    pub id: String,
    pub workspace: String,
    pub agent_dir: String,
    pub model: String,
    /// `None` leaves the OpenClaw default
    pub sandbox: Option<bool>,
}

impl AgentForm {
    pub fn create() -> Self {
        Self {
            mode: EditMode::Create,
            id: String::new(),
            workspace: String::new(),
            agent_dir: String::new(),
            model: String::new(),
            sandbox: None,
        }
    }

    pub fn edit(agent: &AgentInfo) -> Self {
        Self {
            mode: EditMode::Edit,
            id: agent.id.clone(),
            workspace: agent.workspace.clone().unwrap_or_default(),
            agent_dir: agent.agent_dir.clone().unwrap_or_default(),
            model: agent.model.clone().unwrap_or_default(),
            sandbox: agent.sandbox,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// The id is the agent's identity and is fixed once it exists
    pub fn id_editable(&self) -> bool {
        self.mode == EditMode::Create
    }

    /// `None` while the id is blank
    pub fn to_agent(&self) -> Option<AgentInfo> {
        Some(AgentInfo {
            id: non_empty(&self.id)?,
            workspace: non_empty(&self.workspace),
            agent_dir: non_empty(&self.agent_dir),
            model: non_empty(&self.model),
            sandbox: self.sandbox,
        })
    }
}

/// New-binding dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingForm {
    pub agent_id: String,
    pub channel: String,
    pub account_id: String,
    peer_kind: PeerKind,
    /// Kept across peer kind switches
    pub peer_id: String,
}

impl BindingForm {
    /// Targets the first agent. `None` when there is no agent to bind to.
    pub fn new(agents: &[AgentInfo]) -> Option<Self> {
        let first = agents.first()?;
        Some(Self {
            agent_id: first.id.clone(),
            channel: String::new(),
            account_id: String::new(),
            peer_kind: PeerKind::Any,
            peer_id: String::new(),
        })
    }

    pub fn peer_kind(&self) -> PeerKind {
        self.peer_kind
    }

    pub fn set_peer_kind(&mut self, kind: PeerKind) {
        self.peer_kind = kind;
    }

    /// `None` when a user or group match has no id yet
    pub fn peer(&self) -> Option<PeerMatch> {
        PeerMatch::from_selection(self.peer_kind, &self.peer_id)
    }

    pub fn to_binding(&self) -> Option<AgentBinding> {
        let agent_id = non_empty(&self.agent_id)?;
        Some(AgentBinding {
            agent_id,
            match_rule: MatchRule {
                channel: non_empty(&self.channel),
                account_id: non_empty(&self.account_id),
                peer: self.peer()?,
            },
        })
    }
}

/// Deletion waiting for the user's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    Agent(String),
    Binding { index: usize, summary: String },
}

impl PendingDelete {
    pub fn prompt(&self) -> String {
        match self {
            PendingDelete::Agent(id) => format!("Delete agent '{}'?", id),
            PendingDelete::Binding { index, summary } => {
                format!("Delete binding #{} ({})?", index + 1, summary)
            }
        }
    }

    fn into_mutation(self) -> Mutation {
        match self {
            PendingDelete::Agent(id) => Mutation::DeleteAgent(id),
            PendingDelete::Binding { index, .. } => Mutation::DeleteBinding(index),
        }
    }
}

/// At most one dialog is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentsDialog {
    Agent(AgentForm),
    Binding(BindingForm),
    ConfirmDelete(PendingDelete),
}

pub struct AgentsPanel {
    backend: Arc<dyn Backend>,
    runtime: Handle,
    phase: AgentsPhase,
    config: AgentsConfig,
    dialog: Option<AgentsDialog>,
    /// Backend rejection of the open dialog's action
    dialog_error: Option<String>,
    load_task: Option<BackgroundTask<AgentsConfig>>,
    mutation_task: Option<BackgroundTask<Mutation>>,
}

impl AgentsPanel {
    /// Create the panel and fetch agents and bindings
    pub fn new(backend: Arc<dyn Backend>, runtime: Handle) -> Self {
        let mut panel = Self {
            backend,
            runtime,
            phase: AgentsPhase::Loading,
            config: AgentsConfig::default(),
            dialog: None,
            dialog_error: None,
            load_task: None,
            mutation_task: None,
        };
        panel.reload();
        panel
    }

    pub fn phase(&self) -> AgentsPhase {
        self.phase
    }

    pub fn agents(&self) -> &[AgentInfo] {
        &self.config.agents
    }

    pub fn bindings(&self) -> &[AgentBinding] {
        &self.config.bindings
    }

    pub fn dialog(&self) -> Option<&AgentsDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut AgentsDialog> {
        self.dialog.as_mut()
    }

    pub fn dialog_error(&self) -> Option<&str> {
        self.dialog_error.as_deref()
    }

    pub fn pending_mutation(&self) -> bool {
        self.mutation_task.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.load_task.is_some() || self.mutation_task.is_some()
    }

    /// Fetch the full snapshot again. A fetch already in flight is dropped.
    pub fn reload(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.load_task = Some(BackgroundTask::spawn(&self.runtime, load_agents(backend)));
    }

    // === Dialogs ===

    fn open(&mut self, dialog: AgentsDialog) {
        self.dialog = Some(dialog);
        self.dialog_error = None;
    }

    pub fn open_create_agent(&mut self) {
        self.open(AgentsDialog::Agent(AgentForm::create()));
    }

    pub fn open_edit_agent(&mut self, id: &str) {
        if let Some(agent) = self.config.agents.iter().find(|a| a.id == id) {
            let form = AgentForm::edit(agent);
            self.open(AgentsDialog::Agent(form));
        }
    }

    /// Returns `false` when no agent exists to bind to
    pub fn open_add_binding(&mut self) -> bool {
        match BindingForm::new(&self.config.agents) {
            Some(form) => {
                self.open(AgentsDialog::Binding(form));
                true
            }
            None => false,
        }
    }

    pub fn request_delete_agent(&mut self, id: &str) {
        self.open(AgentsDialog::ConfirmDelete(PendingDelete::Agent(id.to_string())));
    }

    pub fn request_delete_binding(&mut self, index: usize) {
        let Some(binding) = self.config.bindings.get(index) else {
            return;
        };
        let summary = format!("{} <- {}", binding.agent_id, binding.match_rule.summary());
        self.open(AgentsDialog::ConfirmDelete(PendingDelete::Binding { index, summary }));
    }

    pub fn close_dialog(&mut self) {
        if self.mutation_task.is_none() {
            self.dialog = None;
            self.dialog_error = None;
        }
    }

    /// Whether the open dialog's primary action can run now
    pub fn can_submit(&self) -> bool {
        if self.mutation_task.is_some() {
            return false;
        }
        match &self.dialog {
            Some(AgentsDialog::Agent(form)) => form.to_agent().is_some(),
            Some(AgentsDialog::Binding(form)) => form.to_binding().is_some(),
            Some(AgentsDialog::ConfirmDelete(_)) => true,
            None => false,
        }
    }

    /// Run the open dialog's primary action
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        let mutation = match &self.dialog {
            Some(AgentsDialog::Agent(form)) => form.to_agent().map(Mutation::SaveAgent),
            Some(AgentsDialog::Binding(form)) => form.to_binding().map(Mutation::SaveBinding),
            Some(AgentsDialog::ConfirmDelete(pending)) => Some(pending.clone().into_mutation()),
            None => None,
        };
        let Some(mutation) = mutation else {
            return false;
        };
        self.dialog_error = None;
        let backend = Arc::clone(&self.backend);
        self.mutation_task = Some(BackgroundTask::spawn(
            &self.runtime,
            apply_mutation(backend, mutation),
        ));
        true
    }

    // === Per-frame polling ===

    pub fn poll(&mut self) {
        // A reload started below is collected on a later frame
        if let Some(result) = take_finished(&mut self.load_task) {
            match result {
                Ok(config) => self.config = config,
                Err(e) => warn!("[agents] Failed to load agents config: {}", e),
            }
            self.phase = AgentsPhase::Ready;
        }

        if let Some(result) = take_finished(&mut self.mutation_task) {
            match result {
                Ok(_) => {
                    self.dialog = None;
                    self.dialog_error = None;
                    self.reload();
                }
                Err(e) => {
                    error!("[agents] Change rejected: {}", e);
                    self.dialog_error = Some(e.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: &str) -> AgentInfo {
        AgentInfo {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_agent_form_requires_id() {
        let mut form = AgentForm::create();
        form.model = "anthropic/claude".into();
        assert!(form.to_agent().is_none());

        form.id = "  work ".into();
        let built = form.to_agent().unwrap();
        assert_eq!(built.id, "work");
        assert_eq!(built.model.as_deref(), Some("anthropic/claude"));
        assert_eq!(built.workspace, None);
    }

    #[test]
    fn test_edit_form_locks_id() {
        let existing = AgentInfo {
            id: "main".into(),
            sandbox: Some(true),
            ..Default::default()
        };
        let form = AgentForm::edit(&existing);
        assert!(!form.id_editable());
        assert_eq!(form.to_agent().unwrap(), existing);
        assert!(AgentForm::create().id_editable());
    }

    #[test]
    fn test_binding_form_defaults_to_first_agent() {
        assert!(BindingForm::new(&[]).is_none());
        let form = BindingForm::new(&[agent("a"), agent("b")]).unwrap();
        assert_eq!(form.agent_id, "a");
        assert_eq!(form.peer(), Some(PeerMatch::Any));
    }

    #[test]
    fn test_peer_switch_keeps_text() {
        let mut form = BindingForm::new(&[agent("a")]).unwrap();
        form.set_peer_kind(PeerKind::User);
        assert!(form.to_binding().is_none());

        form.peer_id = "42".into();
        assert_eq!(form.peer(), Some(PeerMatch::UserId("42".into())));

        form.set_peer_kind(PeerKind::Any);
        assert_eq!(form.peer(), Some(PeerMatch::Any));
        assert_eq!(form.peer_id, "42");

        form.set_peer_kind(PeerKind::Group);
        let binding = form.to_binding().unwrap();
        assert_eq!(binding.match_rule.peer, PeerMatch::GroupId("42".into()));
        assert_eq!(binding.match_rule.channel, None);
    }

    #[test]
    fn test_delete_prompts() {
        assert_eq!(
            PendingDelete::Agent("x".into()).prompt(),
            "Delete agent 'x'?"
        );
        let pending = PendingDelete::Binding {
            index: 2,
            summary: "s".into(),
        };
        assert_eq!(pending.clone().into_mutation(), Mutation::DeleteBinding(2));
        assert!(pending.prompt().starts_with("Delete binding #3"));
    }
}

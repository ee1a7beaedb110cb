//! Integration tests for the agents/routing panel

mod common;

use std::sync::Arc;

use tokio::runtime::Handle;

use openclaw_manager::domain::{
    AgentBinding, AgentInfo, AgentsConfig, MatchRule, PeerKind, PeerMatch,
};
use openclaw_manager::gui::AgentsPanel;
use openclaw_manager::gui::agents::{AgentsDialog, AgentsPhase};

use common::{MockBackend, settle_agents, settle_mutation};

fn agent(id: &str) -> AgentInfo {
    AgentInfo {
        id: id.to_string(),
        ..Default::default()
    }
}

fn binding(agent_id: &str, channel: &str) -> AgentBinding {
    AgentBinding {
        agent_id: agent_id.to_string(),
        match_rule: MatchRule {
            channel: Some(channel.to_string()),
            ..Default::default()
        },
    }
}

fn sample() -> AgentsConfig {
    AgentsConfig {
        agents: vec![agent("main"), agent("work")],
        bindings: vec![binding("work", "slack"), binding("main", "telegram")],
    }
}

async fn loaded_panel(backend: &Arc<MockBackend>) -> AgentsPanel {
    let mut panel = AgentsPanel::new(backend.clone(), Handle::current());
    assert_eq!(panel.phase(), AgentsPhase::Loading);
    settle_agents(&mut panel).await;
    assert_eq!(panel.phase(), AgentsPhase::Ready);
    panel
}

#[tokio::test]
async fn test_single_fetch_loads_agents_and_bindings() {
    let backend = Arc::new(MockBackend::with_agents(sample()));
    let panel = loaded_panel(&backend).await;

    assert_eq!(backend.count("get_agents"), 1);
    assert_eq!(panel.agents().len(), 2);
    assert_eq!(panel.bindings().len(), 2);
}

#[tokio::test]
async fn test_delete_agent_is_not_patched_locally() {
    let backend = Arc::new(MockBackend::with_agents(sample()));
    let mut panel = loaded_panel(&backend).await;

    panel.request_delete_agent("work");
    assert!(matches!(panel.dialog(), Some(AgentsDialog::ConfirmDelete(_))));
    assert_eq!(backend.count("delete_agent"), 0, "waits for confirmation");

    assert!(panel.submit());
    settle_mutation(&mut panel).await;

    // Backend already cascaded; the local lists still show the old snapshot
    assert_eq!(backend.agents().bindings.len(), 1);
    assert_eq!(panel.agents().len(), 2);
    assert_eq!(panel.bindings().len(), 2);
    assert!(panel.dialog().is_none());

    settle_agents(&mut panel).await;
    assert_eq!(backend.count("get_agents"), 2);
    assert_eq!(panel.agents(), &[agent("main")]);
    assert_eq!(panel.bindings(), &[binding("main", "telegram")]);
}

#[tokio::test]
async fn test_create_agent_refetches() {
    let backend = Arc::new(MockBackend::with_agents(AgentsConfig::default()));
    let mut panel = loaded_panel(&backend).await;

    assert!(!panel.open_add_binding(), "no agents to bind to");

    panel.open_create_agent();
    assert!(!panel.can_submit());
    if let Some(AgentsDialog::Agent(form)) = panel.dialog_mut() {
        form.id = "helper".into();
        form.model = "anthropic/claude-sonnet".into();
    }
    assert!(panel.submit());
    settle_agents(&mut panel).await;

    assert_eq!(backend.count("save_agent"), 1);
    assert_eq!(backend.count("get_agents"), 2);
    assert_eq!(panel.agents().len(), 1);
    assert_eq!(panel.agents()[0].model.as_deref(), Some("anthropic/claude-sonnet"));
}

#[tokio::test]
async fn test_edit_keeps_identity() {
    let backend = Arc::new(MockBackend::with_agents(sample()));
    let mut panel = loaded_panel(&backend).await;

    panel.open_edit_agent("work");
    let Some(AgentsDialog::Agent(form)) = panel.dialog_mut() else {
        panic!("edit dialog should be open");
    };
    assert!(!form.id_editable());
    form.workspace = "~/work".into();
    assert!(panel.submit());
    settle_agents(&mut panel).await;

    let agents = backend.agents().agents;
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[1].workspace.as_deref(), Some("~/work"));
}

#[tokio::test]
async fn test_binding_peer_switching() {
    let backend = Arc::new(MockBackend::with_agents(sample()));
    let mut panel = loaded_panel(&backend).await;

    assert!(panel.open_add_binding());
    let Some(AgentsDialog::Binding(form)) = panel.dialog_mut() else {
        panic!("binding dialog should be open");
    };
    assert_eq!(form.agent_id, "main");

    form.channel = "discord".into();
    form.set_peer_kind(PeerKind::Group);
    form.peer_id = "ops-room".into();
    form.set_peer_kind(PeerKind::Any);
    assert_eq!(form.peer(), Some(PeerMatch::Any));
    form.set_peer_kind(PeerKind::User);
    assert_eq!(form.peer(), Some(PeerMatch::UserId("ops-room".into())));
    form.set_peer_kind(PeerKind::Group);

    assert!(panel.submit());
    settle_agents(&mut panel).await;

    let saved = backend.agents().bindings;
    assert_eq!(saved.len(), 3);
    assert_eq!(saved[2].match_rule.peer, PeerMatch::GroupId("ops-room".into()));
    assert_eq!(saved[2].match_rule.channel.as_deref(), Some("discord"));
    assert_eq!(panel.bindings().len(), 3);
}

#[tokio::test]
async fn test_blank_peer_id_disables_submit() {
    let backend = Arc::new(MockBackend::with_agents(sample()));
    let mut panel = loaded_panel(&backend).await;

    panel.open_add_binding();
    if let Some(AgentsDialog::Binding(form)) = panel.dialog_mut() {
        form.set_peer_kind(PeerKind::User);
    }
    assert!(!panel.can_submit());
    assert!(!panel.submit());
    assert_eq!(backend.count("save_binding"), 0);
}

#[tokio::test]
async fn test_rejected_binding_keeps_dialog_with_error() {
    let backend = Arc::new(MockBackend::with_agents(sample()));
    let mut panel = loaded_panel(&backend).await;

    panel.open_add_binding();
    if let Some(AgentsDialog::Binding(form)) = panel.dialog_mut() {
        form.agent_id = "ghost".into();
    }
    assert!(panel.submit());
    settle_agents(&mut panel).await;

    assert!(matches!(panel.dialog(), Some(AgentsDialog::Binding(_))));
    assert!(panel.dialog_error().unwrap().contains("ghost"));
    assert_eq!(backend.count("get_agents"), 1, "no refetch after a rejection");
}

#[tokio::test]
async fn test_delete_binding_by_index() {
    let backend = Arc::new(MockBackend::with_agents(sample()));
    let mut panel = loaded_panel(&backend).await;

    panel.request_delete_binding(0);
    assert!(panel.submit());
    settle_agents(&mut panel).await;

    assert_eq!(panel.bindings(), &[binding("main", "telegram")]);
    assert_eq!(panel.agents().len(), 2);
}

//! Backend calls behind the agents panel

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::backend::{Backend, BackendResult};
use crate::domain::{AgentBinding, AgentInfo, AgentsConfig};

/// A change requested from the agents panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SaveAgent(AgentInfo),
    DeleteAgent(String),
    SaveBinding(AgentBinding),
    DeleteBinding(usize),
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::SaveAgent(agent) => write!(f, "save agent '{}'", agent.id),
            Mutation::DeleteAgent(id) => write!(f, "delete agent '{}'", id),
            Mutation::SaveBinding(binding) => write!(f, "add binding for '{}'", binding.agent_id),
            Mutation::DeleteBinding(index) => write!(f, "delete binding #{}", index + 1),
        }
    }
}

pub async fn load_agents(backend: Arc<dyn Backend>) -> BackendResult<AgentsConfig> {
    backend.get_agents_config().await
}

/// Send one mutation. The caller re-fetches on success.
pub async fn apply_mutation(backend: Arc<dyn Backend>, mutation: Mutation) -> BackendResult<Mutation> {
    match &mutation {
        Mutation::SaveAgent(agent) => backend.save_agent(agent).await?,
        Mutation::DeleteAgent(id) => backend.delete_agent(id).await?,
        Mutation::SaveBinding(binding) => backend.save_agent_binding(binding).await?,
        Mutation::DeleteBinding(index) => backend.delete_agent_binding(*index).await?,
    }
    info!("[agents] Applied: {}", mutation);
    Ok(mutation)
}

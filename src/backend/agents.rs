//! Agent list and routing bindings inside `openclaw.json`
//!
//! `agents.list` is normally an object keyed by agent id. Documents written by
//! newer gateways use an array of `{ "id": ... }` entries instead; both are read
//! and updated in place.

use serde_json::{Map, Value, json};

use super::error::{BackendError, BackendResult};
use super::store::{as_object, non_empty, object_at, set_or_remove};
use crate::domain::{AgentBinding, AgentInfo, AgentsConfig, MatchRule};

fn agent_from_entry(id: &str, entry: &Value) -> AgentInfo {
    let model = entry
        .pointer("/model/primary")
        .or_else(|| entry.get("model").filter(|m| m.is_string()))
        .and_then(Value::as_str)
        .map(String::from);
    AgentInfo {
        id: id.to_string(),
        workspace: entry.get("workspace").and_then(Value::as_str).map(String::from),
        agent_dir: entry.get("agentDir").and_then(Value::as_str).map(String::from),
        model,
        sandbox: entry.get("sandbox").and_then(Value::as_bool),
    }
}

fn binding_from_entry(entry: &Value) -> AgentBinding {
    // Malformed entries still occupy their index so deletes stay aligned
    let match_rule = entry
        .get("match")
        .cloned()
        .and_then(|m| serde_json::from_value::<MatchRule>(m).ok())
        .unwrap_or_default();
    AgentBinding {
        agent_id: entry
            .get("agentId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        match_rule,
    }
}

pub(super) fn read_agents(doc: &Value) -> AgentsConfig {
    let agents = match doc.pointer("/agents/list") {
        Some(Value::Object(list)) => list
            .iter()
            .map(|(id, entry)| agent_from_entry(id, entry))
            .collect(),
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(|entry| {
                let id = entry.get("id").and_then(Value::as_str)?;
                Some(agent_from_entry(id, entry))
            })
            .collect(),
        _ => Vec::new(),
    };

    let bindings = doc
        .pointer("/agents/bindings")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(binding_from_entry).collect())
        .unwrap_or_default();

    AgentsConfig { agents, bindings }
}

fn agent_exists(doc: &Value, id: &str) -> bool {
    match doc.pointer("/agents/list") {
        Some(Value::Object(list)) => list.contains_key(id),
        Some(Value::Array(list)) => list
            .iter()
            .any(|entry| entry.get("id").and_then(Value::as_str) == Some(id)),
        _ => false,
    }
}

/// Write the editable fields into `entry`, keeping anything else it holds
fn merge_agent_fields(entry: &mut Map<String, Value>, agent: &AgentInfo) {
    set_or_remove(
        entry,
        "workspace",
        non_empty(agent.workspace.as_deref()).map(Value::from),
    );
    set_or_remove(
        entry,
        "agentDir",
        non_empty(agent.agent_dir.as_deref()).map(Value::from),
    );
    match non_empty(agent.model.as_deref()) {
        Some(model) => match entry.get_mut("model").and_then(Value::as_object_mut) {
            // Keep fallbacks and other model options
            Some(existing) => {
                existing.insert("primary".into(), json!(model));
            }
            None => {
                entry.insert("model".into(), json!({ "primary": model }));
            }
        },
        None => {
            entry.remove("model");
        }
    }
    set_or_remove(entry, "sandbox", agent.sandbox.map(Value::Bool));
}

/// Insert or update an agent by id
pub(super) fn upsert_agent(doc: &mut Value, agent: &AgentInfo) -> BackendResult<()> {
    let id = agent.id.trim();
    if id.is_empty() {
        return Err(BackendError::Invalid("Agent id cannot be empty".to_string()));
    }

    let agents = object_at(doc, &["agents"]);
    let list = agents
        .entry("list".to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    let entry = match list {
        Value::Array(entries) => {
            let position = entries
                .iter()
                .position(|entry| entry.get("id").and_then(Value::as_str) == Some(id));
            match position {
                Some(index) => &mut entries[index],
                None => {
                    entries.push(json!({ "id": id }));
                    let last = entries.len() - 1;
                    &mut entries[last]
                }
            }
        }
        other => as_object(other)
            .entry(id.to_string())
            .or_insert_with(|| Value::Object(Map::new())),
    };
    merge_agent_fields(as_object(entry), agent);
    Ok(())
}

/// Remove an agent and every binding that routes to it
pub(super) fn remove_agent(doc: &mut Value, id: &str) -> BackendResult<usize> {
    let removed = match doc.pointer_mut("/agents/list") {
        Some(Value::Object(list)) => list.remove(id).is_some(),
        Some(Value::Array(list)) => {
            let before = list.len();
            list.retain(|entry| entry.get("id").and_then(Value::as_str) != Some(id));
            list.len() != before
        }
        _ => false,
    };
    if !removed {
        return Err(BackendError::NotFound(format!("Agent '{}'", id)));
    }

    let mut dropped = 0;
    if let Some(bindings) = doc
        .pointer_mut("/agents/bindings")
        .and_then(Value::as_array_mut)
    {
        let before = bindings.len();
        bindings.retain(|b| b.get("agentId").and_then(Value::as_str) != Some(id));
        dropped = before - bindings.len();
    }
    Ok(dropped)
}

/// Append a binding. The target agent must exist.
pub(super) fn push_binding(doc: &mut Value, binding: &AgentBinding) -> BackendResult<()> {
    let agent_id = binding.agent_id.trim();
    if agent_id.is_empty() {
        return Err(BackendError::Invalid(
            "Binding must reference an agent".to_string(),
        ));
    }
    if !agent_exists(doc, agent_id) {
        return Err(BackendError::NotFound(format!("Agent '{}'", agent_id)));
    }

    let normalized = AgentBinding {
        agent_id: agent_id.to_string(),
        match_rule: MatchRule {
            channel: non_empty(binding.match_rule.channel.as_deref()),
            account_id: non_empty(binding.match_rule.account_id.as_deref()),
            peer: binding.match_rule.peer.clone(),
        },
    };
    let entry = serde_json::to_value(&normalized)
        .map_err(|e| BackendError::Invalid(format!("Failed to serialize binding: {}", e)))?;

    let agents = object_at(doc, &["agents"]);
    let bindings = agents
        .entry("bindings".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    match bindings {
        Value::Array(list) => list.push(entry),
        other => *other = Value::Array(vec![entry]),
    }
    Ok(())
}

/// Remove the binding at `index`
pub(super) fn remove_binding(doc: &mut Value, index: usize) -> BackendResult<AgentBinding> {
    let bindings = doc
        .pointer_mut("/agents/bindings")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| BackendError::NotFound("Bindings".to_string()))?;
    if index >= bindings.len() {
        return Err(BackendError::Invalid(format!(
            "Binding index {} out of range",
            index
        )));
    }
    Ok(binding_from_entry(&bindings.remove(index)))
}

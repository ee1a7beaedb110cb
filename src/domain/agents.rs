//! Agent definitions and message-routing bindings.

use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// An agent definition. `id` is the durable identity and never changes once
/// the agent exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfo {
    pub id: String,
    pub workspace: Option<String>,
    pub agent_dir: Option<String>,
    pub model: Option<String>,
    pub sandbox: Option<bool>,
}

/// Which peers a binding applies to.
///
/// On the wire this is absent/null (any peer), a bare string (user id) or
/// `{"kind": "group", "id": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PeerMatch {
    #[default]
    Any,
    UserId(String),
    GroupId(String),
}

/// Selector for the peer sub-form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PeerKind {
    #[default]
    Any,
    User,
    Group,
}

impl PeerKind {
    pub const ALL: [PeerKind; 3] = [PeerKind::Any, PeerKind::User, PeerKind::Group];

    pub fn label(&self) -> &'static str {
        match self {
            PeerKind::Any => "Any peer",
            PeerKind::User => "User ID",
            PeerKind::Group => "Group ID",
        }
    }
}

impl PeerMatch {
    pub fn is_any(&self) -> bool {
        matches!(self, PeerMatch::Any)
    }

    pub fn kind(&self) -> PeerKind {
        match self {
            PeerMatch::Any => PeerKind::Any,
            PeerMatch::UserId(_) => PeerKind::User,
            PeerMatch::GroupId(_) => PeerKind::Group,
        }
    }

    /// The id carried by a user or group match
    pub fn id(&self) -> Option<&str> {
        match self {
            PeerMatch::Any => None,
            PeerMatch::UserId(id) | PeerMatch::GroupId(id) => Some(id),
        }
    }

    /// Build a match from the sub-form selection. Returns `None` when a user
    /// or group match has no id to match on.
    pub fn from_selection(kind: PeerKind, id: &str) -> Option<Self> {
        let id = id.trim();
        match kind {
            PeerKind::Any => Some(PeerMatch::Any),
            _ if id.is_empty() => None,
            PeerKind::User => Some(PeerMatch::UserId(id.to_string())),
            PeerKind::Group => Some(PeerMatch::GroupId(id.to_string())),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PeerMatch::Any => "any peer".to_string(),
            PeerMatch::UserId(id) => format!("user {}", id),
            PeerMatch::GroupId(id) => format!("group {}", id),
        }
    }
}

impl Serialize for PeerMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PeerMatch::Any => serializer.serialize_none(),
            PeerMatch::UserId(id) => serializer.serialize_str(id),
            PeerMatch::GroupId(id) => {
                let mut group = serializer.serialize_struct("PeerRef", 2)?;
                group.serialize_field("kind", "group")?;
                group.serialize_field("id", id)?;
                group.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPeer {
    Id(String),
    Ref {
        #[serde(default)]
        kind: String,
        id: String,
    },
}

impl<'de> Deserialize<'de> for PeerMatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let peer = match Option::<RawPeer>::deserialize(deserializer)? {
            None => PeerMatch::Any,
            Some(RawPeer::Id(id)) => PeerMatch::UserId(id),
            Some(RawPeer::Ref { kind, id }) if kind == "group" => PeerMatch::GroupId(id),
            // Other object kinds (dm, user, ...) address a single peer
            Some(RawPeer::Ref { id, .. }) => PeerMatch::UserId(id),
        };
        Ok(peer)
    }
}

/// Conditions a message must satisfy for a binding to route it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "PeerMatch::is_any")]
    pub peer: PeerMatch,
}

impl MatchRule {
    /// One-line summary for list rows
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!(
            "channel={}",
            self.channel.as_deref().unwrap_or("*")
        ));
        if let Some(account) = &self.account_id {
            parts.push(format!("account={}", account));
        }
        parts.push(self.peer.describe());
        parts.join(", ")
    }
}

/// Routes matching messages to an agent. Identified only by its position in
/// the binding list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentBinding {
    pub agent_id: String,
    #[serde(rename = "match", default)]
    pub match_rule: MatchRule,
}

/// Agents and bindings fetched together as one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentsConfig {
    pub agents: Vec<AgentInfo>,
    pub bindings: Vec<AgentBinding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_peer_wire_shapes() {
        assert_eq!(serde_json::to_value(PeerMatch::Any).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(PeerMatch::UserId("42".into())).unwrap(),
            json!("42")
        );
        assert_eq!(
            serde_json::to_value(PeerMatch::GroupId("g-1".into())).unwrap(),
            json!({"kind": "group", "id": "g-1"})
        );
    }

    #[test]
    fn test_peer_reads_legacy_and_object_forms() {
        let user: PeerMatch = serde_json::from_value(json!("alice")).unwrap();
        assert_eq!(user, PeerMatch::UserId("alice".into()));

        let group: PeerMatch = serde_json::from_value(json!({"kind": "group", "id": "ops"})).unwrap();
        assert_eq!(group, PeerMatch::GroupId("ops".into()));

        let dm: PeerMatch = serde_json::from_value(json!({"kind": "dm", "id": "bob"})).unwrap();
        assert_eq!(dm, PeerMatch::UserId("bob".into()));

        let none: PeerMatch = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(none, PeerMatch::Any);
    }

    #[test]
    fn test_match_rule_omits_any_peer() {
        let rule = MatchRule {
            channel: Some("telegram".into()),
            account_id: None,
            peer: PeerMatch::Any,
        };
        assert_eq!(serde_json::to_value(&rule).unwrap(), json!({"channel": "telegram"}));

        let parsed: MatchRule = serde_json::from_value(json!({"channel": "telegram"})).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn test_from_selection() {
        assert_eq!(
            PeerMatch::from_selection(PeerKind::Any, "ignored"),
            Some(PeerMatch::Any)
        );
        assert_eq!(
            PeerMatch::from_selection(PeerKind::User, " 123 "),
            Some(PeerMatch::UserId("123".into()))
        );
        assert_eq!(
            PeerMatch::from_selection(PeerKind::Group, "team"),
            Some(PeerMatch::GroupId("team".into()))
        );
        assert_eq!(PeerMatch::from_selection(PeerKind::Group, "   "), None);
    }

    #[test]
    fn test_binding_uses_match_key() {
        let binding = AgentBinding {
            agent_id: "work".into(),
            match_rule: MatchRule {
                peer: PeerMatch::GroupId("g".into()),
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&binding).unwrap(),
            json!({"agentId": "work", "match": {"peer": {"kind": "group", "id": "g"}}})
        );
    }
}

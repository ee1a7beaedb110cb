//! Mapping between the settings slices and their locations in `openclaw.json`

use serde_json::{Value, json};

use super::store::{non_empty, object_at, prune_empty, set_or_remove};
use crate::domain::{
    BrowserConfig, CompactionConfig, DEFAULT_GATEWAY_PORT, GatewayConfig, LogLevel,
    SubagentDefaults, TimeFormat, WebConfig, WorkspaceConfig,
};

const DEFAULTS: &[&str] = &["agents", "defaults"];
const SUBAGENTS: &[&str] = &["agents", "defaults", "subagents"];

fn str_at(doc: &Value, pointer: &str) -> Option<String> {
    doc.pointer(pointer)
        .and_then(Value::as_str)
        .map(String::from)
}

fn u32_at(doc: &Value, pointer: &str) -> Option<u32> {
    doc.pointer(pointer)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

fn bool_at(doc: &Value, pointer: &str) -> Option<bool> {
    doc.pointer(pointer).and_then(Value::as_bool)
}

// ============================================================================
// Browser
// ============================================================================

pub(super) fn read_browser(doc: &Value) -> BrowserConfig {
    BrowserConfig {
        enabled: bool_at(doc, "/meta/gui/browser/enabled").unwrap_or(true),
        color: str_at(doc, "/meta/gui/browser/color"),
    }
}

pub(super) fn write_browser(doc: &mut Value, config: &BrowserConfig) {
    let mut browser = json!({ "enabled": config.enabled });
    if let Some(color) = non_empty(config.color.as_deref()) {
        browser["color"] = json!(color);
    }
    object_at(doc, &["meta", "gui"]).insert("browser".into(), browser);
}

// ============================================================================
// Web search
// ============================================================================

pub(super) fn read_web(doc: &Value) -> WebConfig {
    WebConfig {
        brave_api_key: str_at(doc, "/web/braveApiKey"),
    }
}

pub(super) fn write_web(doc: &mut Value, config: &WebConfig) {
    let key = non_empty(config.brave_api_key.as_deref()).map(Value::from);
    set_or_remove(object_at(doc, &["web"]), "braveApiKey", key);
}

// ============================================================================
// Compaction
// ============================================================================

pub(super) fn read_compaction(doc: &Value) -> CompactionConfig {
    let compaction = doc.pointer("/agents/defaults/compaction");
    let pruning = doc.pointer("/agents/defaults/contextPruning");

    // Either node may be a plain bool or an object carrying settings
    let enabled = compaction
        .map(|v| v.as_bool().unwrap_or(v.is_object()))
        .unwrap_or(false);
    let context_pruning = pruning
        .map(|v| v.as_bool().unwrap_or(v.is_object()))
        .unwrap_or(false);

    CompactionConfig {
        enabled,
        threshold: u32_at(doc, "/agents/defaults/compaction/threshold"),
        context_pruning,
        max_context_messages: u32_at(doc, "/agents/defaults/contextPruning/maxMessages"),
    }
}

pub(super) fn write_compaction(doc: &mut Value, config: &CompactionConfig) {
    let defaults = object_at(doc, DEFAULTS);

    let compaction = config.enabled.then(|| match config.threshold {
        Some(threshold) => json!({ "threshold": threshold }),
        None => json!({}),
    });
    set_or_remove(defaults, "compaction", compaction);

    let pruning = config
        .context_pruning
        .then(|| match config.max_context_messages {
            Some(max) => json!({ "maxMessages": max }),
            None => json!(true),
        });
    set_or_remove(defaults, "contextPruning", pruning);
}

// ============================================================================
// Workspace
// ============================================================================

pub(super) fn read_workspace(doc: &Value) -> WorkspaceConfig {
    WorkspaceConfig {
        workspace: str_at(doc, "/agents/defaults/workspace"),
        timezone: str_at(doc, "/agents/defaults/timezone"),
        time_format: str_at(doc, "/agents/defaults/timeFormat")
            .as_deref()
            .and_then(TimeFormat::from_stored),
        skip_bootstrap: bool_at(doc, "/agents/defaults/skipBootstrap").unwrap_or(false),
        bootstrap_max_chars: u32_at(doc, "/agents/defaults/bootstrapMaxChars"),
    }
}

pub(super) fn write_workspace(doc: &mut Value, config: &WorkspaceConfig) {
    let defaults = object_at(doc, DEFAULTS);
    set_or_remove(
        defaults,
        "workspace",
        non_empty(config.workspace.as_deref()).map(Value::from),
    );
    set_or_remove(
        defaults,
        "timezone",
        non_empty(config.timezone.as_deref()).map(Value::from),
    );
    set_or_remove(
        defaults,
        "timeFormat",
        config.time_format.as_ref().map(|tf| Value::from(tf.as_str())),
    );
    set_or_remove(
        defaults,
        "skipBootstrap",
        config.skip_bootstrap.then(|| Value::Bool(true)),
    );
    set_or_remove(
        defaults,
        "bootstrapMaxChars",
        config.bootstrap_max_chars.map(Value::from),
    );
}

// ============================================================================
// Gateway
// ============================================================================

pub(super) fn read_gateway(doc: &Value) -> GatewayConfig {
    let port = doc
        .pointer("/gateway/port")
        .and_then(Value::as_u64)
        .and_then(|p| u16::try_from(p).ok())
        .filter(|p| *p != 0)
        .unwrap_or(DEFAULT_GATEWAY_PORT);
    let log_level = str_at(doc, "/logging/level")
        .as_deref()
        .map(LogLevel::from_stored)
        .unwrap_or_default();
    GatewayConfig { port, log_level }
}

pub(super) fn write_gateway(doc: &mut Value, config: &GatewayConfig) {
    object_at(doc, &["gateway"]).insert("port".into(), json!(config.port));
    object_at(doc, &["logging"]).insert("level".into(), json!(config.log_level.as_str()));
}

// ============================================================================
// Subagents
// ============================================================================

pub(super) fn read_subagents(doc: &Value) -> SubagentDefaults {
    SubagentDefaults {
        max_spawn_depth: u32_at(doc, "/agents/defaults/subagents/maxSpawnDepth"),
        max_children_per_agent: u32_at(doc, "/agents/defaults/subagents/maxChildrenPerAgent"),
        max_concurrent: u32_at(doc, "/agents/defaults/subagents/maxConcurrent"),
    }
}

pub(super) fn write_subagents(doc: &mut Value, config: &SubagentDefaults) {
    let subagents = object_at(doc, SUBAGENTS);
    set_or_remove(
        subagents,
        "maxSpawnDepth",
        config.max_spawn_depth.map(Value::from),
    );
    set_or_remove(
        subagents,
        "maxChildrenPerAgent",
        config.max_children_per_agent.map(Value::from),
    );
    set_or_remove(
        subagents,
        "maxConcurrent",
        config.max_concurrent.map(Value::from),
    );
    prune_empty(doc, SUBAGENTS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_defaults_to_enabled() {
        let doc = json!({});
        assert_eq!(read_browser(&doc), BrowserConfig::default());
    }

    #[test]
    fn test_browser_empty_color_not_stored() {
        let mut doc = json!({});
        write_browser(
            &mut doc,
            &BrowserConfig {
                enabled: false,
                color: Some("  ".into()),
            },
        );
        assert_eq!(doc, json!({"meta": {"gui": {"browser": {"enabled": false}}}}));
    }

    #[test]
    fn test_web_key_removed_when_empty() {
        let mut doc = json!({"web": {"braveApiKey": "old", "other": 1}});
        write_web(&mut doc, &WebConfig { brave_api_key: Some(String::new()) });
        assert_eq!(doc, json!({"web": {"other": 1}}));
    }

    #[test]
    fn test_compaction_round_trip_with_settings() {
        let config = CompactionConfig {
            enabled: true,
            threshold: Some(80_000),
            context_pruning: true,
            max_context_messages: Some(40),
        };
        let mut doc = json!({});
        write_compaction(&mut doc, &config);
        assert_eq!(
            doc,
            json!({"agents": {"defaults": {
                "compaction": {"threshold": 80000},
                "contextPruning": {"maxMessages": 40}
            }}})
        );
        assert_eq!(read_compaction(&doc), config);
    }

    #[test]
    fn test_compaction_plain_flags() {
        let doc = json!({"agents": {"defaults": {"compaction": true, "contextPruning": true}}});
        let config = read_compaction(&doc);
        assert!(config.enabled);
        assert!(config.context_pruning);
        assert_eq!(config.threshold, None);

        let mut doc = doc.clone();
        write_compaction(&mut doc, &CompactionConfig::default());
        assert_eq!(doc, json!({"agents": {"defaults": {}}}));
    }

    #[test]
    fn test_workspace_round_trip() {
        let config = WorkspaceConfig {
            workspace: Some("/home/me/claw".into()),
            timezone: Some("Europe/Berlin".into()),
            time_format: Some(TimeFormat::TwentyFourHour),
            skip_bootstrap: true,
            bootstrap_max_chars: Some(20_000),
        };
        let mut doc = json!({});
        write_workspace(&mut doc, &config);
        assert_eq!(doc["agents"]["defaults"]["timeFormat"], json!("24h"));
        assert_eq!(read_workspace(&doc), config);

        write_workspace(&mut doc, &WorkspaceConfig::default());
        assert_eq!(doc, json!({"agents": {"defaults": {}}}));
    }

    #[test]
    fn test_gateway_defaults_and_invalid_port() {
        assert_eq!(read_gateway(&json!({})), GatewayConfig::default());
        let doc = json!({"gateway": {"port": 70000}, "logging": {"level": "debug"}});
        let gateway = read_gateway(&doc);
        assert_eq!(gateway.port, DEFAULT_GATEWAY_PORT);
        assert_eq!(gateway.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_unlisted_values_survive_unedited_save() {
        let original = json!({
            "logging": {"level": "trace"},
            "gateway": {"port": 18789},
            "agents": {"defaults": {"timeFormat": "auto"}}
        });
        let mut doc = original.clone();

        let gateway = read_gateway(&doc);
        let workspace = read_workspace(&doc);
        assert_eq!(gateway.log_level, LogLevel::Other("trace".into()));
        assert_eq!(workspace.time_format, Some(TimeFormat::Other("auto".into())));

        write_gateway(&mut doc, &gateway);
        write_workspace(&mut doc, &workspace);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_subagents_pruned_when_cleared() {
        let mut doc = json!({});
        write_subagents(
            &mut doc,
            &SubagentDefaults {
                max_spawn_depth: Some(2),
                max_children_per_agent: None,
                max_concurrent: Some(8),
            },
        );
        assert_eq!(
            doc,
            json!({"agents": {"defaults": {"subagents": {"maxSpawnDepth": 2, "maxConcurrent": 8}}}})
        );
        write_subagents(&mut doc, &SubagentDefaults::default());
        assert_eq!(doc, json!({"agents": {"defaults": {}}}));
    }
}

//! Integration tests for LocalBackend against a real openclaw.json on disk

use std::fs;

use serde_json::{Value, json};
use tempfile::TempDir;

use openclaw_manager::backend::{Backend, LocalBackend};
use openclaw_manager::config::ManagerConfig;
use openclaw_manager::domain::{
    AgentBinding, AgentInfo, DEFAULT_GATEWAY_PORT, GatewayConfig, LogLevel, MatchRule, PeerMatch,
    WebConfig,
};

fn backend_in(dir: &TempDir) -> LocalBackend {
    let mut config = ManagerConfig::default();
    config.openclaw_dir = Some(dir.path().join(".openclaw"));
    config.uninstall.cli_command.clear();
    config.uninstall.stop_gateway = false;
    LocalBackend::new(&config)
}

fn write_doc(backend: &LocalBackend, doc: &Value) {
    let path = backend.config_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
}

fn read_doc(backend: &LocalBackend) -> Value {
    serde_json::from_str(&fs::read_to_string(backend.config_path()).unwrap()).unwrap()
}

#[tokio::test]
async fn test_missing_document_reads_defaults() {
    let dir = TempDir::new().unwrap();
    let backend = backend_in(&dir);

    let gateway = backend.get_gateway_config().await.unwrap();
    assert_eq!(gateway.port, DEFAULT_GATEWAY_PORT);
    assert!(backend.get_browser_config().await.unwrap().enabled);
    assert!(backend.get_agents_config().await.unwrap().agents.is_empty());
}

#[tokio::test]
async fn test_slice_save_keeps_unrelated_keys() {
    let dir = TempDir::new().unwrap();
    let backend = backend_in(&dir);
    write_doc(
        &backend,
        &json!({
            "gateway": {"port": 8080, "auth": {"token": "keep-me"}},
            "channels": {"telegram": {"enabled": true}}
        }),
    );

    backend
        .save_gateway_config(&GatewayConfig {
            port: 9090,
            log_level: LogLevel::Warn,
        })
        .await
        .unwrap();

    let doc = read_doc(&backend);
    assert_eq!(doc["gateway"]["port"], json!(9090));
    assert_eq!(doc["gateway"]["auth"]["token"], json!("keep-me"));
    assert_eq!(doc["logging"]["level"], json!("warn"));
    assert_eq!(doc["channels"]["telegram"]["enabled"], json!(true));
}

#[tokio::test]
async fn test_clearing_api_key_removes_it() {
    let dir = TempDir::new().unwrap();
    let backend = backend_in(&dir);
    write_doc(&backend, &json!({"web": {"braveApiKey": "BSA-1"}}));

    backend
        .save_web_config(&WebConfig {
            brave_api_key: None,
        })
        .await
        .unwrap();

    assert_eq!(backend.get_web_config().await.unwrap().brave_api_key, None);
    assert_eq!(read_doc(&backend)["web"], json!({}));
}

#[tokio::test]
async fn test_agent_and_binding_lifecycle() {
    let dir = TempDir::new().unwrap();
    let backend = backend_in(&dir);

    let agent = AgentInfo {
        id: "work".into(),
        model: Some("openai/gpt-5".into()),
        ..Default::default()
    };
    backend.save_agent(&agent).await.unwrap();
    backend
        .save_agent(&AgentInfo {
            id: "main".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        read_doc(&backend)["agents"]["list"]["work"]["model"],
        json!({"primary": "openai/gpt-5"})
    );

    let binding = AgentBinding {
        agent_id: "work".into(),
        match_rule: MatchRule {
            channel: Some("slack".into()),
            account_id: None,
            peer: PeerMatch::GroupId("eng".into()),
        },
    };
    backend.save_agent_binding(&binding).await.unwrap();

    let orphan = AgentBinding {
        agent_id: "ghost".into(),
        ..Default::default()
    };
    assert!(backend.save_agent_binding(&orphan).await.is_err());

    let config = backend.get_agents_config().await.unwrap();
    assert_eq!(config.agents.len(), 2);
    assert_eq!(config.bindings, vec![binding]);

    backend.delete_agent("work").await.unwrap();
    let config = backend.get_agents_config().await.unwrap();
    assert_eq!(config.agents.len(), 1);
    assert!(config.bindings.is_empty());

    assert!(backend.delete_agent_binding(0).await.is_err());
    assert!(backend.delete_agent("work").await.is_err());
}

#[tokio::test]
async fn test_export_then_import_replaces_document() {
    let dir = TempDir::new().unwrap();
    let backend = backend_in(&dir);
    write_doc(&backend, &json!({"gateway": {"port": 8080}}));

    let export_path = dir.path().join("backup.json");
    backend.export_config(&export_path).await.unwrap();

    write_doc(&backend, &json!({"gateway": {"port": 1234}}));
    backend.import_config(&export_path).await.unwrap();
    assert_eq!(backend.get_gateway_config().await.unwrap().port, 8080);

    let not_object = dir.path().join("list.json");
    fs::write(&not_object, "[1, 2, 3]").unwrap();
    assert!(backend.import_config(&not_object).await.is_err());
    assert!(backend.import_config(&dir.path().join("missing.json")).await.is_err());
    assert_eq!(backend.get_gateway_config().await.unwrap().port, 8080);
}

#[tokio::test]
async fn test_uninstall_removes_data_dir() {
    let dir = TempDir::new().unwrap();
    let backend = backend_in(&dir);
    write_doc(&backend, &json!({"gateway": {"port": 8080}}));
    let data_dir = backend.config_path().parent().unwrap().to_path_buf();

    let report = backend.uninstall_openclaw().await.unwrap();
    assert!(report.success, "{:?}", report);
    assert!(!data_dir.exists());
}

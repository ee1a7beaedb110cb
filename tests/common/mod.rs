//! Shared test utilities for panel integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use openclaw_manager::backend::{Backend, BackendError, BackendResult, ProgressSink};
use openclaw_manager::domain::{
    AgentBinding, AgentInfo, AgentsConfig, BrowserConfig, CompactionConfig, DownloadEvent,
    GatewayConfig, SettingsSnapshot, SubagentDefaults, UninstallReport, UpdateInfo, WebConfig,
    WorkspaceConfig,
};
use openclaw_manager::gui::{AgentsPanel, PanelEvent, SettingsPanel};

/// In-memory backend that records every call
pub struct MockBackend {
    pub state: Mutex<MockState>,
}

pub struct MockState {
    pub settings: SettingsSnapshot,
    pub agents: AgentsConfig,
    /// Every call by name, in order
    pub calls: Vec<String>,
    /// Slice names whose load fails
    pub fail_loads: Vec<String>,
    /// Slice names whose save fails with this message
    pub fail_saves: Vec<(String, String)>,
    pub uninstall_report: UninstallReport,
    pub update: Option<UpdateInfo>,
    pub download_events: Vec<DownloadEvent>,
    pub fail_download: Option<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            settings: SettingsSnapshot::default(),
            agents: AgentsConfig::default(),
            calls: Vec::new(),
            fail_loads: Vec::new(),
            fail_saves: Vec::new(),
            uninstall_report: UninstallReport::succeeded("OpenClaw removed"),
            update: None,
            download_events: Vec::new(),
            fail_download: None,
        }
    }
}

impl MockBackend {
    pub fn new(state: MockState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with_settings(settings: SettingsSnapshot) -> Self {
        Self::new(MockState {
            settings,
            ..Default::default()
        })
    }

    pub fn with_agents(agents: AgentsConfig) -> Self {
        Self::new(MockState {
            agents,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn settings(&self) -> SettingsSnapshot {
        self.state.lock().unwrap().settings.clone()
    }

    pub fn agents(&self) -> AgentsConfig {
        self.state.lock().unwrap().agents.clone()
    }

    fn record(&self, call: &str) -> std::sync::MutexGuard<'_, MockState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        state
    }

    fn load<T>(&self, slice: &str, pick: impl FnOnce(&SettingsSnapshot) -> T) -> BackendResult<T> {
        let state = self.record(&format!("get_{}", slice));
        if state.fail_loads.iter().any(|s| s == slice) {
            return Err(BackendError::Http(format!("{} unavailable", slice)));
        }
        Ok(pick(&state.settings))
    }

    fn save(&self, slice: &str, apply: impl FnOnce(&mut SettingsSnapshot)) -> BackendResult<()> {
        let mut state = self.record(&format!("save_{}", slice));
        if let Some((_, message)) = state.fail_saves.iter().find(|(s, _)| s == slice) {
            return Err(BackendError::Invalid(message.clone()));
        }
        apply(&mut state.settings);
        Ok(())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get_browser_config(&self) -> BackendResult<BrowserConfig> {
        self.load("browser", |s| s.browser.clone())
    }

    async fn get_web_config(&self) -> BackendResult<WebConfig> {
        self.load("web", |s| s.web.clone())
    }

    async fn get_compaction_config(&self) -> BackendResult<CompactionConfig> {
        self.load("compaction", |s| s.compaction.clone())
    }

    async fn get_workspace_config(&self) -> BackendResult<WorkspaceConfig> {
        self.load("workspace", |s| s.workspace.clone())
    }

    async fn get_gateway_config(&self) -> BackendResult<GatewayConfig> {
        self.load("gateway", |s| s.gateway.clone())
    }

    async fn get_subagent_defaults(&self) -> BackendResult<SubagentDefaults> {
        self.load("subagents", |s| s.subagents.clone())
    }

    async fn save_browser_config(&self, config: &BrowserConfig) -> BackendResult<()> {
        self.save("browser", |s| s.browser = config.clone())
    }

    async fn save_web_config(&self, config: &WebConfig) -> BackendResult<()> {
        self.save("web", |s| s.web = config.clone())
    }

    async fn save_compaction_config(&self, config: &CompactionConfig) -> BackendResult<()> {
        self.save("compaction", |s| s.compaction = config.clone())
    }

    async fn save_workspace_config(&self, config: &WorkspaceConfig) -> BackendResult<()> {
        self.save("workspace", |s| s.workspace = config.clone())
    }

    async fn save_gateway_config(&self, config: &GatewayConfig) -> BackendResult<()> {
        self.save("gateway", |s| s.gateway = config.clone())
    }

    async fn save_subagent_defaults(&self, config: &SubagentDefaults) -> BackendResult<()> {
        self.save("subagents", |s| s.subagents = config.clone())
    }

    async fn export_config(&self, _dest: &Path) -> BackendResult<()> {
        self.record("export");
        Ok(())
    }

    async fn import_config(&self, _src: &Path) -> BackendResult<()> {
        self.record("import");
        Ok(())
    }

    async fn uninstall_openclaw(&self) -> BackendResult<UninstallReport> {
        Ok(self.record("uninstall").uninstall_report.clone())
    }

    async fn get_agents_config(&self) -> BackendResult<AgentsConfig> {
        Ok(self.record("get_agents").agents.clone())
    }

    async fn save_agent(&self, agent: &AgentInfo) -> BackendResult<()> {
        let mut state = self.record("save_agent");
        match state.agents.agents.iter_mut().find(|a| a.id == agent.id) {
            Some(existing) => *existing = agent.clone(),
            None => state.agents.agents.push(agent.clone()),
        }
        Ok(())
    }

    async fn delete_agent(&self, id: &str) -> BackendResult<()> {
        let mut state = self.record("delete_agent");
        state.agents.agents.retain(|a| a.id != id);
        state.agents.bindings.retain(|b| b.agent_id != id);
        Ok(())
    }

    async fn save_agent_binding(&self, binding: &AgentBinding) -> BackendResult<()> {
        let mut state = self.record("save_binding");
        if !state.agents.agents.iter().any(|a| a.id == binding.agent_id) {
            return Err(BackendError::NotFound(format!("agent '{}'", binding.agent_id)));
        }
        state.agents.bindings.push(binding.clone());
        Ok(())
    }

    async fn delete_agent_binding(&self, index: usize) -> BackendResult<()> {
        let mut state = self.record("delete_binding");
        if index >= state.agents.bindings.len() {
            return Err(BackendError::NotFound(format!("binding #{}", index)));
        }
        state.agents.bindings.remove(index);
        Ok(())
    }

    async fn kill_all_port_processes(&self) -> BackendResult<String> {
        self.record("kill_port");
        Ok("No gateway processes running".to_string())
    }

    async fn check_for_update(&self) -> BackendResult<Option<UpdateInfo>> {
        Ok(self.record("check_update").update.clone())
    }

    async fn download_and_install(
        &self,
        _info: &UpdateInfo,
        progress: ProgressSink,
    ) -> BackendResult<()> {
        let (events, failure) = {
            let state = self.record("download");
            (state.download_events.clone(), state.fail_download.clone())
        };
        for event in events {
            progress(event);
        }
        match failure {
            Some(message) => Err(BackendError::Http(message)),
            None => Ok(()),
        }
    }

    async fn relaunch(&self) -> BackendResult<()> {
        self.record("relaunch");
        Ok(())
    }
}

/// Poll the settings panel until no call is in flight, collecting its events
pub async fn settle_settings(panel: &mut SettingsPanel) -> Vec<PanelEvent> {
    let mut events = Vec::new();
    for _ in 0..400 {
        events.extend(panel.poll());
        if !panel.is_busy() {
            return events;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("settings panel did not settle");
}

pub async fn settle_agents(panel: &mut AgentsPanel) {
    for _ in 0..400 {
        panel.poll();
        if !panel.is_busy() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("agents panel did not settle");
}

/// Poll until the agents panel has no mutation in flight
pub async fn settle_mutation(panel: &mut AgentsPanel) {
    for _ in 0..400 {
        panel.poll();
        if !panel.pending_mutation() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("mutation did not finish");
}

//! Backend that works directly on the local OpenClaw installation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::error::BackendResult;
use super::store::ConfigStore;
use super::update::UpdateClient;
use super::{Backend, ProgressSink, agents, slices, system};
use crate::config::{ManagerConfig, UninstallSettings};
use crate::domain::{
    AgentBinding, AgentInfo, AgentsConfig, BrowserConfig, CompactionConfig, GatewayConfig,
    SubagentDefaults, UninstallReport, UpdateInfo, WebConfig, WorkspaceConfig,
};

/// Reads and writes `openclaw.json` and manages the local installation
pub struct LocalBackend {
    store: Arc<ConfigStore>,
    data_dir: PathBuf,
    uninstall: UninstallSettings,
    updater: UpdateClient,
}

impl LocalBackend {
    pub fn new(config: &ManagerConfig) -> Self {
        Self {
            store: Arc::new(ConfigStore::new(config.openclaw_config_path())),
            data_dir: config.openclaw_dir(),
            uninstall: config.uninstall.clone(),
            updater: UpdateClient::new(config.update.repo.clone()),
        }
    }

    pub fn config_path(&self) -> &Path {
        self.store.path()
    }

    /// Run a store operation on the blocking pool
    async fn with_store<T, F>(&self, f: F) -> BackendResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&ConfigStore) -> BackendResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store)).await?
    }
}

#[async_trait]
impl Backend for LocalBackend {
    async fn get_browser_config(&self) -> BackendResult<BrowserConfig> {
        self.with_store(|s| s.read(slices::read_browser)).await
    }

    async fn get_web_config(&self) -> BackendResult<WebConfig> {
        self.with_store(|s| s.read(slices::read_web)).await
    }

    async fn get_compaction_config(&self) -> BackendResult<CompactionConfig> {
        self.with_store(|s| s.read(slices::read_compaction)).await
    }

    async fn get_workspace_config(&self) -> BackendResult<WorkspaceConfig> {
        self.with_store(|s| s.read(slices::read_workspace)).await
    }

    async fn get_gateway_config(&self) -> BackendResult<GatewayConfig> {
        self.with_store(|s| s.read(slices::read_gateway)).await
    }

    async fn get_subagent_defaults(&self) -> BackendResult<SubagentDefaults> {
        self.with_store(|s| s.read(slices::read_subagents)).await
    }

    async fn save_browser_config(&self, config: &BrowserConfig) -> BackendResult<()> {
        let config = config.clone();
        self.with_store(move |s| {
            s.update(|doc| {
                slices::write_browser(doc, &config);
                Ok(())
            })
        })
        .await?;
        info!("[backend] Browser configuration saved");
        Ok(())
    }

    async fn save_web_config(&self, config: &WebConfig) -> BackendResult<()> {
        let config = config.clone();
        self.with_store(move |s| {
            s.update(|doc| {
                slices::write_web(doc, &config);
                Ok(())
            })
        })
        .await?;
        info!("[backend] Web search configuration saved");
        Ok(())
    }

    async fn save_compaction_config(&self, config: &CompactionConfig) -> BackendResult<()> {
        let config = config.clone();
        self.with_store(move |s| {
            s.update(|doc| {
                slices::write_compaction(doc, &config);
                Ok(())
            })
        })
        .await?;
        info!("[backend] Compaction configuration saved");
        Ok(())
    }

    async fn save_workspace_config(&self, config: &WorkspaceConfig) -> BackendResult<()> {
        let config = config.clone();
        self.with_store(move |s| {
            s.update(|doc| {
                slices::write_workspace(doc, &config);
                Ok(())
            })
        })
        .await?;
        info!("[backend] Workspace configuration saved");
        Ok(())
    }

    async fn save_gateway_config(&self, config: &GatewayConfig) -> BackendResult<()> {
        let config = config.clone();
        self.with_store(move |s| {
            s.update(|doc| {
                slices::write_gateway(doc, &config);
                Ok(())
            })
        })
        .await?;
        info!("[backend] Gateway configuration saved (restart required)");
        Ok(())
    }

    async fn save_subagent_defaults(&self, config: &SubagentDefaults) -> BackendResult<()> {
        let config = config.clone();
        self.with_store(move |s| {
            s.update(|doc| {
                slices::write_subagents(doc, &config);
                Ok(())
            })
        })
        .await?;
        info!("[backend] Subagent defaults saved");
        Ok(())
    }

    async fn export_config(&self, dest: &Path) -> BackendResult<()> {
        let dest = dest.to_path_buf();
        self.with_store(move |s| s.export_to(&dest)).await
    }

    async fn import_config(&self, src: &Path) -> BackendResult<()> {
        let src = src.to_path_buf();
        self.with_store(move |s| s.import_from(&src)).await
    }

    async fn uninstall_openclaw(&self) -> BackendResult<UninstallReport> {
        // The port must be read before the data directory disappears
        let port = self
            .with_store(|s| s.read(slices::read_gateway))
            .await
            .map(|g| g.port)
            .unwrap_or(crate::domain::DEFAULT_GATEWAY_PORT);
        let settings = self.uninstall.clone();
        let data_dir = self.data_dir.clone();
        let report =
            tokio::task::spawn_blocking(move || system::uninstall(&settings, &data_dir, port))
                .await?;
        info!(
            "[backend] Uninstall finished: success={} message={}",
            report.success, report.message
        );
        Ok(report)
    }

    async fn get_agents_config(&self) -> BackendResult<AgentsConfig> {
        let config = self.with_store(|s| s.read(agents::read_agents)).await?;
        info!(
            "[backend] Found {} agents, {} bindings",
            config.agents.len(),
            config.bindings.len()
        );
        Ok(config)
    }

    async fn save_agent(&self, agent: &AgentInfo) -> BackendResult<()> {
        let agent = agent.clone();
        let id = agent.id.clone();
        self.with_store(move |s| s.update(|doc| agents::upsert_agent(doc, &agent)))
            .await?;
        info!("[backend] Agent '{}' saved", id);
        Ok(())
    }

    async fn delete_agent(&self, id: &str) -> BackendResult<()> {
        let id = id.to_string();
        let target = id.clone();
        let dropped = self
            .with_store(move |s| s.update(|doc| agents::remove_agent(doc, &target)))
            .await?;
        info!(
            "[backend] Agent '{}' deleted along with {} binding(s)",
            id, dropped
        );
        Ok(())
    }

    async fn save_agent_binding(&self, binding: &AgentBinding) -> BackendResult<()> {
        let binding = binding.clone();
        let agent_id = binding.agent_id.clone();
        self.with_store(move |s| s.update(|doc| agents::push_binding(doc, &binding)))
            .await?;
        info!("[backend] Binding for agent '{}' saved", agent_id);
        Ok(())
    }

    async fn delete_agent_binding(&self, index: usize) -> BackendResult<()> {
        let removed = self
            .with_store(move |s| s.update(|doc| agents::remove_binding(doc, index)))
            .await?;
        info!(
            "[backend] Binding {} for agent '{}' deleted",
            index, removed.agent_id
        );
        Ok(())
    }

    async fn kill_all_port_processes(&self) -> BackendResult<String> {
        let port = self.get_gateway_config().await?.port;
        tokio::task::spawn_blocking(move || system::stop_port_processes(port)).await?
    }

    async fn check_for_update(&self) -> BackendResult<Option<UpdateInfo>> {
        let updater = self.updater.clone();
        tokio::task::spawn_blocking(move || updater.check()).await?
    }

    async fn download_and_install(
        &self,
        info: &UpdateInfo,
        on_event: ProgressSink,
    ) -> BackendResult<()> {
        let updater = self.updater.clone();
        let info = info.clone();
        tokio::task::spawn_blocking(move || {
            let binary = updater.download(&info, &|event| on_event(event))?;
            updater.install(&binary)
        })
        .await?
    }

    async fn relaunch(&self) -> BackendResult<()> {
        tokio::task::spawn_blocking(system::relaunch).await?
    }
}

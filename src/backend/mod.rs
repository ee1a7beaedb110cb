//! Backend boundary used by the Settings and Agents panels
//!
//! Every call is async and returns either a value or a textual error. The
//! panels never touch files or processes directly.

mod agents;
mod error;
mod local;
mod slices;
mod store;
mod system;
mod update;

pub use error::{BackendError, BackendResult};
pub use local::LocalBackend;
pub use store::ConfigStore;
pub use update::{CURRENT_VERSION, UpdateClient, platform_asset_name, select_update};

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    AgentBinding, AgentInfo, AgentsConfig, BrowserConfig, CompactionConfig, DownloadEvent,
    GatewayConfig, SubagentDefaults, UninstallReport, UpdateInfo, WebConfig, WorkspaceConfig,
};

/// Receives download progress while an update installs
pub type ProgressSink = Arc<dyn Fn(DownloadEvent) + Send + Sync>;

/// Operations the OpenClaw backend exposes to the manager
#[async_trait]
pub trait Backend: Send + Sync {
    async fn get_browser_config(&self) -> BackendResult<BrowserConfig>;
    async fn get_web_config(&self) -> BackendResult<WebConfig>;
    async fn get_compaction_config(&self) -> BackendResult<CompactionConfig>;
    async fn get_workspace_config(&self) -> BackendResult<WorkspaceConfig>;
    async fn get_gateway_config(&self) -> BackendResult<GatewayConfig>;
    async fn get_subagent_defaults(&self) -> BackendResult<SubagentDefaults>;

    async fn save_browser_config(&self, config: &BrowserConfig) -> BackendResult<()>;
    async fn save_web_config(&self, config: &WebConfig) -> BackendResult<()>;
    async fn save_compaction_config(&self, config: &CompactionConfig) -> BackendResult<()>;
    async fn save_workspace_config(&self, config: &WorkspaceConfig) -> BackendResult<()>;
    /// Takes effect after the gateway restarts
    async fn save_gateway_config(&self, config: &GatewayConfig) -> BackendResult<()>;
    async fn save_subagent_defaults(&self, config: &SubagentDefaults) -> BackendResult<()>;

    /// Write the whole OpenClaw document to `dest`
    async fn export_config(&self, dest: &Path) -> BackendResult<()>;
    /// Replace the OpenClaw document with the contents of `src`
    async fn import_config(&self, src: &Path) -> BackendResult<()>;
    /// Remove OpenClaw from this machine. Failure is reported in the report.
    async fn uninstall_openclaw(&self) -> BackendResult<UninstallReport>;

    async fn get_agents_config(&self) -> BackendResult<AgentsConfig>;
    /// Create or update an agent by id
    async fn save_agent(&self, agent: &AgentInfo) -> BackendResult<()>;
    /// Delete an agent and the bindings routing to it
    async fn delete_agent(&self, id: &str) -> BackendResult<()>;
    /// Append a routing binding
    async fn save_agent_binding(&self, binding: &AgentBinding) -> BackendResult<()>;
    /// Delete the binding at `index` of the last fetched list
    async fn delete_agent_binding(&self, index: usize) -> BackendResult<()>;

    /// Stop whatever listens on the gateway port; returns a summary line
    async fn kill_all_port_processes(&self) -> BackendResult<String>;

    /// `None` when the running build is the latest
    async fn check_for_update(&self) -> BackendResult<Option<UpdateInfo>>;
    async fn download_and_install(
        &self,
        info: &UpdateInfo,
        on_event: ProgressSink,
    ) -> BackendResult<()>;
    /// Start a new instance of the manager
    async fn relaunch(&self) -> BackendResult<()>;
}

//! Records owned by the OpenClaw backend and edited by the manager

mod agents;
mod settings;
mod update;

pub use agents::{AgentBinding, AgentInfo, AgentsConfig, MatchRule, PeerKind, PeerMatch};
pub use settings::{
    BrowserConfig, CompactionConfig, DEFAULT_GATEWAY_PORT, GatewayConfig, LogLevel,
    MAX_CHILDREN_PER_AGENT, MAX_CONCURRENT_SUBAGENTS, MAX_SPAWN_DEPTH, SettingsSnapshot,
    SubagentDefaults, TimeFormat, WebConfig, WorkspaceConfig,
};
pub use update::{DownloadEvent, UninstallReport, UpdateInfo};

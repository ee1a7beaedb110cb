//! Configuration slices edited by the settings panel.
//!
//! Each slice is fetched and persisted independently through the backend.

use serde::{Deserialize, Serialize};

/// Default port the gateway listens on when none is configured
pub const DEFAULT_GATEWAY_PORT: u16 = 18789;

/// Upper bounds for the subagent limits (inclusive, lower bound is 0)
pub const MAX_SPAWN_DEPTH: u32 = 10;
pub const MAX_CHILDREN_PER_AGENT: u32 = 50;
pub const MAX_CONCURRENT_SUBAGENTS: u32 = 100;

/// Browser control settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserConfig {
    pub enabled: bool,
    /// Accent color as a hex string (e.g. `#ff4500`)
    pub color: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: None,
        }
    }
}

/// Web search settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebConfig {
    /// Brave Search API key. Rendered masked.
    pub brave_api_key: Option<String>,
}

/// Context compaction and pruning settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactionConfig {
    pub enabled: bool,
    /// Only meaningful while `enabled` is true
    pub threshold: Option<u32>,
    pub context_pruning: bool,
    /// Only meaningful while `context_pruning` is true
    pub max_context_messages: Option<u32>,
}

/// Clock format used in agent prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeFormat {
    TwelveHour,
    TwentyFourHour,
    /// A value this version does not know, written back verbatim
    Other(String),
}

impl TimeFormat {
    pub fn as_str(&self) -> &str {
        match self {
            TimeFormat::TwelveHour => "12h",
            TimeFormat::TwentyFourHour => "24h",
            TimeFormat::Other(raw) => raw,
        }
    }

    /// Parse one of the formats the picker offers
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "12h" => Some(TimeFormat::TwelveHour),
            "24h" => Some(TimeFormat::TwentyFourHour),
            _ => None,
        }
    }

    /// Read the stored value. Blank and `"default"` mean no explicit format;
    /// anything unrecognized is kept as [`TimeFormat::Other`].
    pub fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "" | "default" => None,
            other => Some(
                Self::parse(other).unwrap_or_else(|| TimeFormat::Other(other.to_string())),
            ),
        }
    }
}

impl From<String> for TimeFormat {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or(TimeFormat::Other(value))
    }
}

impl From<TimeFormat> for String {
    fn from(value: TimeFormat) -> Self {
        value.as_str().to_string()
    }
}

/// Agent workspace defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    pub workspace: Option<String>,
    /// IANA zone id (e.g. `Europe/Berlin`)
    pub timezone: Option<String>,
    /// `None` means the gateway default
    pub time_format: Option<TimeFormat>,
    pub skip_bootstrap: bool,
    pub bootstrap_max_chars: Option<u32>,
}

/// Gateway log verbosity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// A level the gateway accepts but the picker does not list (e.g. `trace`)
    Other(String),
}

impl LogLevel {
    /// Levels offered in the picker
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Other(raw) => raw,
        }
    }

    /// Parse one of the listed levels
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Read the stored value; blank is the default level, unknown text is kept
    pub fn from_stored(value: &str) -> Self {
        match value.trim() {
            "" => LogLevel::default(),
            other => Self::parse(other).unwrap_or_else(|| LogLevel::Other(other.to_string())),
        }
    }
}

impl From<String> for LogLevel {
    fn from(value: String) -> Self {
        Self::from_stored(&value)
    }
}

impl From<LogLevel> for String {
    fn from(value: LogLevel) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway process settings. Changes only apply after the gateway restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    pub port: u16,
    pub log_level: LogLevel,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_GATEWAY_PORT,
            log_level: LogLevel::Info,
        }
    }
}

/// Limits applied to subagent spawning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubagentDefaults {
    /// 0..=10
    pub max_spawn_depth: Option<u32>,
    /// 0..=50
    pub max_children_per_agent: Option<u32>,
    /// 0..=100
    pub max_concurrent: Option<u32>,
}

/// All six slices, as loaded or about to be saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub browser: BrowserConfig,
    pub web: WebConfig,
    pub compaction: CompactionConfig,
    pub workspace: WorkspaceConfig,
    pub gateway: GatewayConfig,
    pub subagents: SubagentDefaults,
}

//! Editable form state for the six settings slices
//!
//! Numeric fields are kept as text so partially typed values survive between
//! frames. [`SettingsForm::to_snapshot`] is the only place text is parsed.

use std::ops::RangeInclusive;

use crate::domain::{
    BrowserConfig, CompactionConfig, GatewayConfig, LogLevel, MAX_CHILDREN_PER_AGENT,
    MAX_CONCURRENT_SUBAGENTS, MAX_SPAWN_DEPTH, SettingsSnapshot, SubagentDefaults, TimeFormat,
    WebConfig, WorkspaceConfig,
};

/// Offered in the timezone picker; any other IANA id can be typed
pub const COMMON_TIMEZONES: &[&str] = &[
    "UTC",
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
    "America/Sao_Paulo",
    "Europe/London",
    "Europe/Berlin",
    "Europe/Paris",
    "Europe/Moscow",
    "Africa/Johannesburg",
    "Asia/Dubai",
    "Asia/Kolkata",
    "Asia/Shanghai",
    "Asia/Singapore",
    "Asia/Tokyo",
    "Australia/Sydney",
    "Pacific/Auckland",
];

/// Form fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CompactionThreshold,
    MaxContextMessages,
    BootstrapMaxChars,
    GatewayPort,
    MaxSpawnDepth,
    MaxChildrenPerAgent,
    MaxConcurrent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    /// Message for `field` among errors already collected this frame
    pub fn lookup(errors: &[FieldError], field: Field) -> Option<String> {
        errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsForm {
    pub browser_enabled: bool,
    pub browser_color: String,

    pub brave_api_key: String,
    pub show_api_key: bool,

    pub compaction_enabled: bool,
    pub compaction_threshold: String,
    pub context_pruning: bool,
    pub max_context_messages: String,

    pub workspace: String,
    pub timezone: String,
    pub time_format: Option<TimeFormat>,
    pub skip_bootstrap: bool,
    pub bootstrap_max_chars: String,

    pub gateway_port: String,
    pub log_level: LogLevel,
    /// Gateway values as loaded, for the restart warning
    loaded_gateway: GatewayConfig,

    pub max_spawn_depth: String,
    pub max_children_per_agent: String,
    pub max_concurrent: String,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn optional_text(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Empty text is `None`; anything else must parse and fall inside `range`
fn parse_bounded(
    value: &str,
    field: Field,
    range: RangeInclusive<u32>,
) -> Result<Option<u32>, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let invalid = || FieldError {
        field,
        message: format!(
            "Enter a whole number between {} and {}",
            range.start(),
            range.end()
        ),
    };
    let parsed: u32 = trimmed.parse().map_err(|_| invalid())?;
    if !range.contains(&parsed) {
        return Err(invalid());
    }
    Ok(Some(parsed))
}

/// Hidden fields never block a save; unparsable text is sent as `None`
fn parse_hidden(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

fn parse_port(value: &str) -> Result<u16, FieldError> {
    value
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| FieldError {
            field: Field::GatewayPort,
            message: "Port must be between 1 and 65535".to_string(),
        })
}

impl SettingsForm {
    pub fn from_snapshot(snapshot: &SettingsSnapshot) -> Self {
        Self {
            browser_enabled: snapshot.browser.enabled,
            browser_color: text(&snapshot.browser.color),
            brave_api_key: text(&snapshot.web.brave_api_key),
            show_api_key: false,
            compaction_enabled: snapshot.compaction.enabled,
            compaction_threshold: number(snapshot.compaction.threshold),
            context_pruning: snapshot.compaction.context_pruning,
            max_context_messages: number(snapshot.compaction.max_context_messages),
            workspace: text(&snapshot.workspace.workspace),
            timezone: text(&snapshot.workspace.timezone),
            time_format: snapshot.workspace.time_format.clone(),
            skip_bootstrap: snapshot.workspace.skip_bootstrap,
            bootstrap_max_chars: number(snapshot.workspace.bootstrap_max_chars),
            gateway_port: snapshot.gateway.port.to_string(),
            log_level: snapshot.gateway.log_level.clone(),
            loaded_gateway: snapshot.gateway.clone(),
            max_spawn_depth: number(snapshot.subagents.max_spawn_depth),
            max_children_per_agent: number(snapshot.subagents.max_children_per_agent),
            max_concurrent: number(snapshot.subagents.max_concurrent),
        }
    }

    /// Parse the form into the six slices, or every validation error
    pub fn to_snapshot(&self) -> Result<SettingsSnapshot, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut check = |result: Result<Option<u32>, FieldError>| match result {
            Ok(value) => value,
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let threshold = if self.compaction_enabled {
            check(parse_bounded(
                &self.compaction_threshold,
                Field::CompactionThreshold,
                1..=u32::MAX,
            ))
        } else {
            parse_hidden(&self.compaction_threshold)
        };
        let max_context_messages = if self.context_pruning {
            check(parse_bounded(
                &self.max_context_messages,
                Field::MaxContextMessages,
                1..=u32::MAX,
            ))
        } else {
            parse_hidden(&self.max_context_messages)
        };
        let bootstrap_max_chars = check(parse_bounded(
            &self.bootstrap_max_chars,
            Field::BootstrapMaxChars,
            0..=u32::MAX,
        ));
        let max_spawn_depth = check(parse_bounded(
            &self.max_spawn_depth,
            Field::MaxSpawnDepth,
            0..=MAX_SPAWN_DEPTH,
        ));
        let max_children_per_agent = check(parse_bounded(
            &self.max_children_per_agent,
            Field::MaxChildrenPerAgent,
            0..=MAX_CHILDREN_PER_AGENT,
        ));
        let max_concurrent = check(parse_bounded(
            &self.max_concurrent,
            Field::MaxConcurrent,
            0..=MAX_CONCURRENT_SUBAGENTS,
        ));
        let port = parse_port(&self.gateway_port);

        let port = match port {
            Ok(port) => port,
            Err(e) => {
                errors.push(e);
                return Err(errors);
            }
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SettingsSnapshot {
            browser: BrowserConfig {
                enabled: self.browser_enabled,
                color: optional_text(&self.browser_color),
            },
            web: WebConfig {
                brave_api_key: optional_text(&self.brave_api_key),
            },
            compaction: CompactionConfig {
                enabled: self.compaction_enabled,
                threshold,
                context_pruning: self.context_pruning,
                max_context_messages,
            },
            workspace: WorkspaceConfig {
                workspace: optional_text(&self.workspace),
                timezone: optional_text(&self.timezone),
                time_format: self.time_format.clone(),
                skip_bootstrap: self.skip_bootstrap,
                bootstrap_max_chars,
            },
            gateway: GatewayConfig {
                port,
                log_level: self.log_level.clone(),
            },
            subagents: SubagentDefaults {
                max_spawn_depth,
                max_children_per_agent,
                max_concurrent,
            },
        })
    }

    pub fn errors(&self) -> Vec<FieldError> {
        self.to_snapshot().err().unwrap_or_default()
    }

    pub fn error_for(&self, field: Field) -> Option<String> {
        FieldError::lookup(&self.errors(), field)
    }

    pub fn is_valid(&self) -> bool {
        self.to_snapshot().is_ok()
    }

    /// Port or log level differ from what the gateway is running with
    pub fn gateway_changed(&self) -> bool {
        let port_changed = self.gateway_port.trim() != self.loaded_gateway.port.to_string();
        port_changed || self.log_level != self.loaded_gateway.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> SettingsSnapshot {
        SettingsSnapshot {
            browser: BrowserConfig {
                enabled: false,
                color: Some("#ff4500".into()),
            },
            web: WebConfig {
                brave_api_key: Some("BSA-123".into()),
            },
            compaction: CompactionConfig {
                enabled: true,
                threshold: Some(90_000),
                context_pruning: false,
                max_context_messages: None,
            },
            workspace: WorkspaceConfig {
                workspace: Some("~/claw".into()),
                timezone: Some("Asia/Tokyo".into()),
                time_format: Some(TimeFormat::TwelveHour),
                skip_bootstrap: true,
                bootstrap_max_chars: Some(4000),
            },
            gateway: GatewayConfig {
                port: 8080,
                log_level: LogLevel::Warn,
            },
            subagents: SubagentDefaults {
                max_spawn_depth: Some(3),
                max_children_per_agent: None,
                max_concurrent: Some(12),
            },
        }
    }

    #[test]
    fn test_unedited_form_round_trips() {
        let snapshot = loaded();
        let form = SettingsForm::from_snapshot(&snapshot);
        assert_eq!(form.to_snapshot().unwrap(), snapshot);
        assert!(!form.gateway_changed());

        let defaults = SettingsSnapshot::default();
        assert_eq!(
            SettingsForm::from_snapshot(&defaults).to_snapshot().unwrap(),
            defaults
        );
    }

    #[test]
    fn test_hidden_threshold_kept_and_not_validated() {
        let mut form = SettingsForm::from_snapshot(&loaded());
        form.compaction_enabled = false;
        assert_eq!(form.compaction_threshold, "90000");
        assert_eq!(
            form.to_snapshot().unwrap().compaction.threshold,
            Some(90_000)
        );

        form.compaction_threshold = "lots".into();
        let snapshot = form.to_snapshot().unwrap();
        assert_eq!(snapshot.compaction.threshold, None);

        form.compaction_enabled = true;
        assert!(form.error_for(Field::CompactionThreshold).is_some());
        assert!(!form.is_valid());
    }

    #[test]
    fn test_port_validation() {
        let mut form = SettingsForm::from_snapshot(&loaded());
        for bad in ["", "0", "65536", "80a"] {
            form.gateway_port = bad.into();
            assert!(form.error_for(Field::GatewayPort).is_some(), "{bad}");
        }
        form.gateway_port = " 9090 ".into();
        assert_eq!(form.to_snapshot().unwrap().gateway.port, 9090);
        assert!(form.gateway_changed());
    }

    #[test]
    fn test_subagent_bounds() {
        let mut form = SettingsForm::from_snapshot(&loaded());
        form.max_spawn_depth = "11".into();
        form.max_children_per_agent = "50".into();
        form.max_concurrent = "101".into();
        let errors = form.errors();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::MaxSpawnDepth, Field::MaxConcurrent]);
    }

    #[test]
    fn test_lookup_in_collected_errors() {
        let mut form = SettingsForm::from_snapshot(&loaded());
        form.gateway_port = "0".into();
        form.max_concurrent = "101".into();
        let errors = form.errors();

        assert_eq!(
            FieldError::lookup(&errors, Field::GatewayPort),
            form.error_for(Field::GatewayPort)
        );
        assert!(FieldError::lookup(&errors, Field::MaxConcurrent).is_some());
        assert_eq!(FieldError::lookup(&errors, Field::MaxSpawnDepth), None);
        assert_eq!(FieldError::lookup(&[], Field::GatewayPort), None);
    }

    #[test]
    fn test_blank_strings_become_none() {
        let mut form = SettingsForm::from_snapshot(&loaded());
        form.browser_color = "  ".into();
        form.brave_api_key.clear();
        form.timezone.clear();
        form.time_format = None;
        let snapshot = form.to_snapshot().unwrap();
        assert_eq!(snapshot.browser.color, None);
        assert_eq!(snapshot.web.brave_api_key, None);
        assert_eq!(snapshot.workspace.timezone, None);
        assert_eq!(snapshot.workspace.time_format, None);
    }
}

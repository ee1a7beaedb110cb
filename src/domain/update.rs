//! Self-update and maintenance records exchanged with the backend.

use serde::{Deserialize, Serialize};

/// A newer release of the manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub version: String,
    /// Release notes (markdown)
    pub body: Option<String>,
    /// Asset URL for the current platform
    pub download_url: String,
    /// Release page
    pub release_url: String,
}

/// Progress notifications emitted while an update downloads.
///
/// Expected order is `Started`, any number of `Progress`, then `Finished`,
/// but consumers must tolerate other orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum DownloadEvent {
    #[serde(rename_all = "camelCase")]
    Started { content_length: Option<u64> },
    #[serde(rename_all = "camelCase")]
    Progress { chunk_length: u64 },
    Finished,
}

/// Outcome of an uninstall request. The call itself never fails; failure is
/// reported here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UninstallReport {
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
}

impl UninstallReport {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

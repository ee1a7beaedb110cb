//! Self-update state machine
//!
//! `Idle -> Checking -> UpToDate | Available -> Downloading -> Done`, with
//! `Error` reachable from `Checking` and `Downloading`. Transition methods
//! return `false` and leave the phase untouched when called from a phase that
//! does not allow them.

use crate::backend::BackendResult;
use crate::domain::{DownloadEvent, UpdateInfo};

/// Accumulated download progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Expected size in bytes, never zero
    pub total: u64,
    pub downloaded: u64,
    /// 0..=100, never decreases
    pub percent: u8,
}

impl Default for DownloadProgress {
    fn default() -> Self {
        Self {
            total: 1,
            downloaded: 0,
            percent: 0,
        }
    }
}

impl DownloadProgress {
    pub fn apply(&mut self, event: DownloadEvent) {
        match event {
            DownloadEvent::Started { content_length } => {
                self.total = content_length.filter(|len| *len > 0).unwrap_or(1);
            }
            DownloadEvent::Progress { chunk_length } => {
                self.downloaded = self.downloaded.saturating_add(chunk_length);
                let ratio = (u128::from(self.downloaded) * 100) / u128::from(self.total);
                let percent = ratio.min(100) as u8;
                self.percent = self.percent.max(percent);
            }
            DownloadEvent::Finished => self.percent = 100,
        }
    }

    pub fn fraction(&self) -> f32 {
        f32::from(self.percent) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UpdatePhase {
    #[default]
    Idle,
    Checking,
    UpToDate,
    Available(UpdateInfo),
    Downloading {
        info: UpdateInfo,
        progress: DownloadProgress,
    },
    Done {
        version: String,
    },
    Error(String),
}

impl UpdatePhase {
    /// A check may start from any settled phase except a finished install
    pub fn begin_check(&mut self) -> bool {
        match self {
            UpdatePhase::Idle
            | UpdatePhase::UpToDate
            | UpdatePhase::Available(_)
            | UpdatePhase::Error(_) => {
                *self = UpdatePhase::Checking;
                true
            }
            _ => false,
        }
    }

    pub fn finish_check(&mut self, result: BackendResult<Option<UpdateInfo>>) -> bool {
        if !matches!(self, UpdatePhase::Checking) {
            return false;
        }
        *self = match result {
            Ok(Some(info)) => UpdatePhase::Available(info),
            Ok(None) => UpdatePhase::UpToDate,
            Err(e) => UpdatePhase::Error(e.to_string()),
        };
        true
    }

    /// Move to `Downloading` and hand back the release to install
    pub fn begin_download(&mut self) -> Option<UpdateInfo> {
        let UpdatePhase::Available(info) = self else {
            return None;
        };
        let info = info.clone();
        *self = UpdatePhase::Downloading {
            info: info.clone(),
            progress: DownloadProgress::default(),
        };
        Some(info)
    }

    pub fn apply_event(&mut self, event: DownloadEvent) -> bool {
        match self {
            UpdatePhase::Downloading { progress, .. } => {
                progress.apply(event);
                true
            }
            _ => false,
        }
    }

    pub fn finish_download(&mut self, result: BackendResult<()>) -> bool {
        let UpdatePhase::Downloading { info, .. } = self else {
            return false;
        };
        *self = match result {
            Ok(()) => UpdatePhase::Done {
                version: info.version.clone(),
            },
            Err(e) => UpdatePhase::Error(e.to_string()),
        };
        true
    }

    /// A backend call is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            UpdatePhase::Checking | UpdatePhase::Downloading { .. }
        )
    }

    pub fn progress(&self) -> Option<DownloadProgress> {
        match self {
            UpdatePhase::Downloading { progress, .. } => Some(*progress),
            _ => None,
        }
    }
}

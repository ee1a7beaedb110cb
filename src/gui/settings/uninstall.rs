//! Two-step uninstall modal

use std::time::{Duration, Instant};

use crate::backend::BackendResult;
use crate::domain::UninstallReport;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UninstallModal {
    #[default]
    Closed,
    /// Waiting for the second confirmation. Holds the last failed report.
    Confirming { report: Option<UninstallReport> },
    Running,
    /// Succeeded; the modal closes on its own at `closes_at`
    Finished {
        report: UninstallReport,
        closes_at: Instant,
    },
}

impl UninstallModal {
    pub fn open(&mut self) -> bool {
        if !matches!(self, UninstallModal::Closed) {
            return false;
        }
        *self = UninstallModal::Confirming { report: None };
        true
    }

    pub fn cancel(&mut self) -> bool {
        if !matches!(self, UninstallModal::Confirming { .. }) {
            return false;
        }
        *self = UninstallModal::Closed;
        true
    }

    /// Second confirmation. The caller starts the backend call on `true`.
    pub fn confirm(&mut self) -> bool {
        if !self.can_confirm() {
            return false;
        }
        *self = UninstallModal::Running;
        true
    }

    /// Record the outcome. Returns `true` when OpenClaw was removed.
    pub fn finish(
        &mut self,
        result: BackendResult<UninstallReport>,
        now: Instant,
        close_delay: Duration,
    ) -> bool {
        if !matches!(self, UninstallModal::Running) {
            return false;
        }
        let report = result.unwrap_or_else(|e| {
            UninstallReport::failed("Uninstall failed", e.to_string())
        });
        if report.success {
            *self = UninstallModal::Finished {
                report,
                closes_at: now + close_delay,
            };
            true
        } else {
            *self = UninstallModal::Confirming {
                report: Some(report),
            };
            false
        }
    }

    /// Close a finished modal once its delay has passed
    pub fn tick(&mut self, now: Instant) {
        if let UninstallModal::Finished { closes_at, .. } = self {
            if now >= *closes_at {
                *self = UninstallModal::Closed;
            }
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, UninstallModal::Closed)
    }

    pub fn can_confirm(&self) -> bool {
        matches!(self, UninstallModal::Confirming { .. })
    }

    /// Report to show inside the modal, if any
    pub fn report(&self) -> Option<&UninstallReport> {
        match self {
            UninstallModal::Confirming { report } => report.as_ref(),
            UninstallModal::Finished { report, .. } => Some(report),
            _ => None,
        }
    }
}

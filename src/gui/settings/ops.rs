//! Parallel load and save of the six settings slices

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{Backend, BackendResult};
use crate::domain::SettingsSnapshot;

fn or_default<T: Default>(slice: &str, result: BackendResult<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("[settings] Failed to load {} config: {}", slice, e);
        T::default()
    })
}

/// Fetch all six slices concurrently. A failed slice keeps its default.
pub async fn load_all(backend: Arc<dyn Backend>) -> SettingsSnapshot {
    let (browser, web, compaction, workspace, gateway, subagents) = futures::join!(
        backend.get_browser_config(),
        backend.get_web_config(),
        backend.get_compaction_config(),
        backend.get_workspace_config(),
        backend.get_gateway_config(),
        backend.get_subagent_defaults(),
    );
    debug!("[settings] All six slices answered");

    SettingsSnapshot {
        browser: or_default("browser", browser),
        web: or_default("web", web),
        compaction: or_default("compaction", compaction),
        workspace: or_default("workspace", workspace),
        gateway: or_default("gateway", gateway),
        subagents: or_default("subagents", subagents),
    }
}

/// Persist all six slices concurrently. Every call runs to completion; the
/// first error in slice order is returned.
pub async fn save_all(backend: Arc<dyn Backend>, snapshot: SettingsSnapshot) -> BackendResult<()> {
    let results = futures::join!(
        backend.save_browser_config(&snapshot.browser),
        backend.save_web_config(&snapshot.web),
        backend.save_compaction_config(&snapshot.compaction),
        backend.save_workspace_config(&snapshot.workspace),
        backend.save_gateway_config(&snapshot.gateway),
        backend.save_subagent_defaults(&snapshot.subagents),
    );
    let (browser, web, compaction, workspace, gateway, subagents) = results;

    let mut first_error = None;
    for (slice, result) in [
        ("browser", browser),
        ("web", web),
        ("compaction", compaction),
        ("workspace", workspace),
        ("gateway", gateway),
        ("subagents", subagents),
    ] {
        if let Err(e) = result {
            warn!("[settings] Failed to save {} config: {}", slice, e);
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => {
            info!("[settings] Settings saved");
            Ok(())
        }
    }
}

//! CLI command implementations

pub mod agents;
pub mod init;
pub mod transfer;

use std::future::Future;

use anyhow::{Context, Result};

/// Drive one backend call to completion on a throwaway runtime
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

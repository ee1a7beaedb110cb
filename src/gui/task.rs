//! Backend calls running off the UI thread
//!
//! A call is spawned on the shared tokio runtime and its result is sent back
//! over an mpsc channel. Panels poll the channel once per frame.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use tokio::runtime::Handle;

use crate::backend::{BackendError, BackendResult};

/// A single in-flight backend call
pub struct BackgroundTask<T> {
    rx: Receiver<BackendResult<T>>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    pub fn spawn<F>(runtime: &Handle, future: F) -> Self
    where
        F: Future<Output = BackendResult<T>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        runtime.spawn(async move {
            // The panel may be gone by now
            let _ = tx.send(future.await);
        });
        Self { rx }
    }

    /// Non-blocking. `Some` exactly once, when the call has finished.
    pub fn poll(&self) -> Option<BackendResult<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(BackendError::Join(
                "task ended without a result".to_string(),
            ))),
        }
    }
}

/// Poll `slot` and clear it once the task has finished
pub fn take_finished<T: Send + 'static>(
    slot: &mut Option<BackgroundTask<T>>,
) -> Option<BackendResult<T>> {
    let result = slot.as_ref()?.poll()?;
    *slot = None;
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_task_delivers_result_once() {
        let mut slot = Some(BackgroundTask::spawn(&Handle::current(), async { Ok(7) }));
        let mut result = None;
        for _ in 0..100 {
            if let Some(r) = take_finished(&mut slot) {
                result = Some(r);
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(result.unwrap().unwrap(), 7);
        assert!(slot.is_none());
        assert!(take_finished(&mut slot).is_none());
    }

    #[tokio::test]
    async fn test_panicking_task_reports_error() {
        let task: BackgroundTask<()> = BackgroundTask::spawn(&Handle::current(), async {
            panic!("boom");
        });
        let mut outcome = None;
        for _ in 0..100 {
            if let Some(r) = task.poll() {
                outcome = Some(r);
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(matches!(outcome, Some(Err(BackendError::Join(_)))));
    }
}

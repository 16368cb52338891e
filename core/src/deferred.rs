//! Cancellable deferred callbacks
//!
//! A `DeferredTask` runs a closure once after a delay on the tokio runtime it
//! was scheduled on. Cancelling (or dropping) the task before the delay
//! elapses means the closure never runs. Under a paused tokio clock the delay
//! is virtual, so tests can fast-forward through it.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub struct DeferredTask {
    handle: Option<JoinHandle<()>>,
}

impl DeferredTask {
    /// Run `callback` once `delay` has elapsed
    pub fn schedule<F>(runtime: &Handle, delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self {
            handle: Some(handle),
        }
    }

    /// True until the callback has run or the task was cancelled
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the task. No-op if it already fired.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Forget the task without aborting it.
    ///
    /// Used by the callback's own owner when the callback is the one
    /// clearing the slot, so the running task is not aborted from inside.
    pub fn disarm(mut self) {
        self.handle.take();
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for DeferredTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredTask")
            .field("pending", &self.is_pending())
            .finish()
    }
}

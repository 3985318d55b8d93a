use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

/// Owned handle to a running readiness poll.
///
/// Cancelling is idempotent and also happens on drop, so replacing the
/// handle held by the controller always stops the previous poll.
#[derive(Debug)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl CancelHandle {
    pub(crate) fn new(cancelled: Arc<AtomicBool>, task: JoinHandle<()>) -> Self {
        Self { cancelled, task }
    }

    /// Stop all future ticks and callbacks.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// The poll reached an outcome or was cancelled and its task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

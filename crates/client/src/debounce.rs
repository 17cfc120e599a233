//! Cancellable delayed work.
//!
//! A [`Debouncer`] keeps at most one pending task. Scheduling new work
//! cancels the previous task if its timer has not fired yet; work that has
//! already started is left to finish.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Handle to one scheduled piece of work.
#[derive(Debug)]
pub struct DebounceHandle {
    cancel: Arc<Notify>,
    task: JoinHandle<()>,
}

impl DebounceHandle {
    /// Cancel the work if its timer is still running. No effect once the
    /// work has started.
    pub fn cancel(&self) {
        self.cancel.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Runs the most recently scheduled work after `delay` of quiescence.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<DebounceHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `work` to run after the delay, cancelling any pending work.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = Arc::new(Notify::new());
        let signal = Arc::clone(&cancel);
        let delay = self.delay;

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = signal.notified() => {
                    tracing::trace!("debounced work cancelled");
                }
                _ = tokio::time::sleep(delay) => work.await,
            }
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(DebounceHandle { cancel, task });
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    /// Cancel the pending work, if any.
    pub fn cancel(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            handle.cancel();
        }
    }

    /// Whether scheduled work has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

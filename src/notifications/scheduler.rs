//! Deferred Removal Scheduler
//!
//! Turns a dismissed toast into an eventual finalize-remove call. Each id has
//! at most one pending timer; asking again for an id that is already pending
//! does nothing. Timers are one-shot tokio tasks spawned on the runtime the
//! scheduler was built with, so callers need not be inside that runtime.

use std::collections::HashMap;
use std::time::Duration;
use log::{debug, trace};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::notifications::toast::ToastId;

pub struct RemovalScheduler {
    delay: Duration,
    runtime: Handle,
    pending: HashMap<ToastId, JoinHandle<()>>,
    cancel: CancellationToken,
}

impl RemovalScheduler {
    pub fn new(runtime: Handle, delay: Duration) -> Self {
        Self {
            delay,
            runtime,
            pending: HashMap::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start the removal timer for `id` unless one is already pending
    ///
    /// `on_fire` runs once the delay elapses. It is expected to call
    /// [`RemovalScheduler::complete`] for the id before removing the toast.
    /// Returns `true` when a new timer was started.
    pub fn schedule<F>(&mut self, id: ToastId, on_fire: F) -> bool
    where
        F: FnOnce(ToastId) + Send + 'static,
    {
        if self.pending.contains_key(&id) {
            trace!("Removal of toast {} already scheduled", id);
            return false;
        }
        if self.cancel.is_cancelled() {
            debug!("Scheduler cancelled, not scheduling removal of toast {}", id);
            return false;
        }

        let delay = self.delay;
        let token = self.cancel.child_token();
        let fire_id = id.clone();
        let task = self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => on_fire(fire_id),
            }
        });

        debug!("Scheduled removal of toast {} in {:?}", id, delay);
        self.pending.insert(id, task);
        true
    }

    /// Drop the bookkeeping for a timer that has fired
    pub fn complete(&mut self, id: &ToastId) -> bool {
        self.pending.remove(id).is_some()
    }

    pub fn is_scheduled(&self, id: &ToastId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Cancel every pending timer; later `schedule` calls are refused
    pub fn cancel_all(&mut self) -> usize {
        self.cancel.cancel();
        let cancelled = self.pending.len();
        for (_, task) in self.pending.drain() {
            task.abort();
        }
        if cancelled > 0 {
            debug!("Cancelled {} pending toast removals", cancelled);
        }
        cancelled
    }
}

impl Drop for RemovalScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

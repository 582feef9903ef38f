//! Toast Store
//!
//! The facade render surfaces and callers use. It owns the active toast
//! sequence, the removal timers and the subscriber registry, and applies every
//! operation inside one critical section: read state, reduce, update timer
//! bookkeeping, then fan out to subscribers.
//!
//! The lock is re-entrant, so a subscriber may call back into the store from
//! inside its callback on the same thread.

use std::cell::RefCell;
use std::sync::{Arc, Weak};
use log::{debug, info, trace};
use parking_lot::ReentrantMutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::notifications::config::ToastConfig;
use crate::notifications::error::{ToastError, ToastResult};
use crate::notifications::id::IdGenerator;
use crate::notifications::reducer::{reduce, Transition};
use crate::notifications::registry::{fan_out, Subscriber, SubscriptionId, SubscriptionRegistry};
use crate::notifications::scheduler::RemovalScheduler;
use crate::notifications::toast::{
    OpenChangeHandler, Toast, ToastContent, ToastId, ToastState, ToastUpdate,
};

/// Counters describing what the store has done since it was built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Toasts raised
    pub created: u64,

    /// Updates that changed an open toast
    pub updated: u64,

    /// Toasts moved from open to dismissed
    pub dismissed: u64,

    /// Toasts deleted by their removal timer
    pub removed: u64,

    /// Toasts dropped from the tail to honour the limit
    pub evicted: u64,

    /// Snapshots handed to subscribers
    pub snapshots_delivered: u64,
}

struct StoreCore {
    state: ToastState,
    scheduler: RemovalScheduler,
    registry: SubscriptionRegistry,
    stats: StoreStats,
    shutdown: bool,
}

struct StoreInner {
    config: ToastConfig,
    ids: IdGenerator,
    core: ReentrantMutex<RefCell<StoreCore>>,
    snapshots: watch::Sender<ToastState>,
}

impl StoreInner {
    /// Reduce, publish and fan out; the caller holds the store lock
    fn apply(&self, core: &RefCell<StoreCore>, transition: Transition) {
        let kind = transition.kind();
        let (snapshot, subscribers) = {
            let mut core = core.borrow_mut();
            let current = std::mem::take(&mut core.state);
            core.state = reduce(current, transition, self.config.limit);
            (core.state.clone(), core.registry.subscribers())
        };
        trace!(
            "Applied {} transition, {} toasts active, fanning out to {} subscribers",
            kind,
            snapshot.len(),
            subscribers.len()
        );

        self.snapshots.send_replace(snapshot.clone());
        let delivered = fan_out(&subscribers, &snapshot);
        core.borrow_mut().stats.snapshots_delivered += delivered as u64;
    }
}

/// Shared handle to a toast store
///
/// Cloning is cheap and every clone refers to the same store.
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<StoreInner>,
}

impl ToastStore {
    /// Build a store driven by the tokio runtime the caller is running in
    pub fn new(config: ToastConfig) -> ToastResult<Self> {
        let runtime = Handle::try_current().map_err(|_| ToastError::NoRuntime)?;
        Self::with_runtime(config, runtime)
    }

    /// Build a store whose removal timers run on `runtime`
    pub fn with_runtime(config: ToastConfig, runtime: Handle) -> ToastResult<Self> {
        config.validate()?;
        debug!(
            "Creating toast store (limit {}, remove delay {:?})",
            config.limit,
            config.remove_delay()
        );

        let core = StoreCore {
            state: ToastState::new(),
            scheduler: RemovalScheduler::new(runtime, config.remove_delay()),
            registry: SubscriptionRegistry::new(),
            stats: StoreStats::default(),
            shutdown: false,
        };
        let (snapshots, _) = watch::channel(ToastState::new());

        Ok(Self {
            inner: Arc::new(StoreInner {
                config,
                ids: IdGenerator::new(),
                core: ReentrantMutex::new(RefCell::new(core)),
                snapshots,
            }),
        })
    }

    fn from_weak(inner: &Weak<StoreInner>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }

    pub fn config(&self) -> &ToastConfig {
        &self.inner.config
    }

    /// Raise a new toast and return a handle bound to its id
    pub fn toast(&self, content: ToastContent) -> ToastHandle {
        let id = self.inner.ids.next_id();
        let handle = ToastHandle {
            id: id.clone(),
            store: Arc::downgrade(&self.inner),
        };

        let guard = self.inner.core.lock();
        {
            let mut core = guard.borrow_mut();
            if core.shutdown {
                debug!("Store shut down, dropping toast {}", id);
                return handle;
            }
            core.stats.created += 1;
            if core.state.len() >= self.inner.config.limit {
                core.stats.evicted += (core.state.len() + 1 - self.inner.config.limit) as u64;
            }
        }

        // Closing from the render surface converges on the store's own dismiss path.
        let weak = Arc::downgrade(&self.inner);
        let handler_id = id.clone();
        let on_open_change = OpenChangeHandler::new(move |open| {
            if open {
                return;
            }
            if let Some(store) = ToastStore::from_weak(&weak) {
                store.dismiss(&handler_id);
            }
        });

        debug!("Adding toast {}", id);
        let toast = Toast::new(id, content).with_open_change(on_open_change);
        self.inner.apply(&guard, Transition::Add(toast));
        handle
    }

    /// Merge `changes` into an open toast
    ///
    /// Returns `false` when the toast is unknown or already dismissed, in which
    /// case nothing is published.
    pub fn update(&self, id: &ToastId, changes: impl Into<ToastUpdate>) -> bool {
        let changes = changes.into();
        let guard = self.inner.core.lock();
        {
            let mut core = guard.borrow_mut();
            if core.shutdown {
                debug!("Store shut down, ignoring update of toast {}", id);
                return false;
            }
            match core.state.get(id) {
                Some(toast) if toast.open => core.stats.updated += 1,
                Some(_) => {
                    debug!("Ignoring update of dismissed toast {}", id);
                    return false;
                }
                None => {
                    debug!("Ignoring update of unknown toast {}", id);
                    return false;
                }
            }
        }

        self.inner.apply(
            &guard,
            Transition::Update {
                id: id.clone(),
                changes,
            },
        );
        true
    }

    /// Dismiss one toast and schedule its removal
    ///
    /// Dismissing a toast twice publishes the same state again and keeps the
    /// single removal timer started by the first call. Returns `false` for an
    /// unknown id.
    pub fn dismiss(&self, id: &ToastId) -> bool {
        let guard = self.inner.core.lock();
        {
            let mut core = guard.borrow_mut();
            if core.shutdown {
                debug!("Store shut down, ignoring dismiss of toast {}", id);
                return false;
            }
            match core.state.get(id).map(|toast| toast.open) {
                Some(true) => core.stats.dismissed += 1,
                Some(false) => trace!("Toast {} already dismissed", id),
                None => {
                    debug!("Ignoring dismiss of unknown toast {}", id);
                    return false;
                }
            }
        }

        self.inner.apply(&guard, Transition::Dismiss(Some(id.clone())));
        self.schedule_removal(&guard, id.clone());
        true
    }

    /// Dismiss every toast and schedule their removal
    pub fn dismiss_all(&self) {
        let guard = self.inner.core.lock();
        let ids = {
            let mut core = guard.borrow_mut();
            if core.shutdown {
                debug!("Store shut down, ignoring dismiss of all toasts");
                return;
            }
            core.stats.dismissed += core.state.open_count() as u64;
            core.state.ids()
        };

        debug!("Dismissing all {} toasts", ids.len());
        self.inner.apply(&guard, Transition::Dismiss(None));
        for id in ids {
            self.schedule_removal(&guard, id);
        }
    }

    /// Dismiss one toast, or every toast when `id` is `None`
    pub fn dismiss_any(&self, id: Option<&ToastId>) -> bool {
        match id {
            Some(id) => self.dismiss(id),
            None => {
                self.dismiss_all();
                true
            }
        }
    }

    fn schedule_removal(&self, core: &RefCell<StoreCore>, id: ToastId) {
        let weak = Arc::downgrade(&self.inner);
        core.borrow_mut().scheduler.schedule(id, move |id| {
            if let Some(store) = ToastStore::from_weak(&weak) {
                store.finalize_remove(&id);
            }
        });
    }

    /// Removal timer callback: drop the timer bookkeeping and delete the toast
    fn finalize_remove(&self, id: &ToastId) {
        let guard = self.inner.core.lock();
        {
            let mut core = guard.borrow_mut();
            if core.shutdown {
                return;
            }
            core.scheduler.complete(id);
            if !core.state.contains(id) {
                trace!("Toast {} already gone when its removal timer fired", id);
                return;
            }
            core.stats.removed += 1;
        }

        debug!("Removing toast {}", id);
        self.inner.apply(&guard, Transition::Remove(Some(id.clone())));
    }

    /// Register a subscriber for every subsequent state
    ///
    /// The current state is not replayed; read it with [`ToastStore::snapshot`].
    pub fn subscribe<S>(&self, subscriber: S) -> Subscription
    where
        S: Subscriber + 'static,
    {
        self.subscribe_arc(Arc::new(subscriber))
    }

    pub fn subscribe_arc(&self, subscriber: Arc<dyn Subscriber>) -> Subscription {
        let guard = self.inner.core.lock();
        let mut core = guard.borrow_mut();
        let id = core.registry.register(subscriber);
        if core.shutdown {
            core.registry.unregister(id);
            debug!("Store shut down, subscription {} is inert", id);
        }
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = self.inner.core.lock();
        let count = guard.borrow().registry.len();
        count
    }

    /// Current state
    pub fn snapshot(&self) -> ToastState {
        let guard = self.inner.core.lock();
        let state = guard.borrow().state.clone();
        state
    }

    /// Receiver that always holds the latest published state
    pub fn watch(&self) -> watch::Receiver<ToastState> {
        self.inner.snapshots.subscribe()
    }

    /// Stream of published states for async render surfaces
    pub fn stream(&self) -> WatchStream<ToastState> {
        WatchStream::new(self.watch())
    }

    pub fn stats(&self) -> StoreStats {
        let guard = self.inner.core.lock();
        let stats = guard.borrow().stats.clone();
        stats
    }

    pub fn pending_removals(&self) -> usize {
        let guard = self.inner.core.lock();
        let pending = guard.borrow().scheduler.pending_count();
        pending
    }

    pub fn is_removal_scheduled(&self, id: &ToastId) -> bool {
        let guard = self.inner.core.lock();
        let scheduled = guard.borrow().scheduler.is_scheduled(id);
        scheduled
    }

    pub fn is_shutdown(&self) -> bool {
        let guard = self.inner.core.lock();
        let shutdown = guard.borrow().shutdown;
        shutdown
    }

    /// Cancel pending removals, drop subscribers and ignore further operations
    pub fn shutdown(&self) {
        let guard = self.inner.core.lock();
        let mut core = guard.borrow_mut();
        if core.shutdown {
            return;
        }
        core.shutdown = true;
        let cancelled = core.scheduler.cancel_all();
        let subscribers = core.registry.clear();
        info!(
            "Toast store shut down ({} pending removals cancelled, {} subscribers dropped)",
            cancelled, subscribers
        );
    }
}

/// Controls for one toast, returned when it is raised
#[derive(Debug, Clone)]
pub struct ToastHandle {
    id: ToastId,
    store: Weak<StoreInner>,
}

impl ToastHandle {
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    pub fn dismiss(&self) -> bool {
        ToastStore::from_weak(&self.store)
            .map(|store| store.dismiss(&self.id))
            .unwrap_or(false)
    }

    pub fn update(&self, changes: impl Into<ToastUpdate>) -> bool {
        ToastStore::from_weak(&self.store)
            .map(|store| store.update(&self.id, changes))
            .unwrap_or(false)
    }
}

/// Registration returned by [`ToastStore::subscribe`]
///
/// Dropping it leaves the subscriber registered; call
/// [`Subscription::unsubscribe`] to stop delivery.
#[derive(Debug)]
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    id: SubscriptionId,
    store: Weak<StoreInner>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stop delivery to this subscriber; repeated calls return `false`
    pub fn unsubscribe(&self) -> bool {
        match self.store.upgrade() {
            Some(inner) => {
                let guard = inner.core.lock();
                let removed = guard.borrow_mut().registry.unregister(self.id);
                removed
            }
            None => false,
        }
    }
}

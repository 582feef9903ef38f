//! Subscription Registry
//!
//! Render surfaces register here to receive every state the store produces.
//! Delivery is synchronous and happens on the thread that applied the
//! transition; no ordering is guaranteed between subscribers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use log::trace;

use crate::notifications::toast::ToastState;

/// Observer of toast state changes
pub trait Subscriber: Send + Sync {
    /// Receive the state produced by the latest transition
    fn handle_state(&self, state: &ToastState);
}

impl<F> Subscriber for F
where
    F: Fn(&ToastState) + Send + Sync,
{
    fn handle_state(&self, state: &ToastState) {
        self(state)
    }
}

/// Identifier of one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Default)]
pub struct SubscriptionRegistry {
    next_id: u64,
    subscribers: HashMap<SubscriptionId, Arc<dyn Subscriber>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.insert(id, subscriber);
        trace!("Registered subscriber {} ({} total)", id, self.subscribers.len());
        id
    }

    /// Remove a registration; unknown or already removed ids return `false`
    pub fn unregister(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(&id).is_some();
        if removed {
            trace!("Unregistered subscriber {} ({} remaining)", id, self.subscribers.len());
        }
        removed
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn clear(&mut self) -> usize {
        let count = self.subscribers.len();
        self.subscribers.clear();
        count
    }

    /// Current subscribers, detached from the registry so delivery can run
    /// while the registry itself is free to change
    pub fn subscribers(&self) -> Vec<Arc<dyn Subscriber>> {
        self.subscribers.values().cloned().collect()
    }
}

/// Deliver `state` to every subscriber, returning the number reached
pub fn fan_out(subscribers: &[Arc<dyn Subscriber>], state: &ToastState) -> usize {
    for subscriber in subscribers {
        subscriber.handle_state(state);
    }
    subscribers.len()
}

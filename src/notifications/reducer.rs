//! Toast State Transitions
//!
//! The reducer is a pure function from the current state and a transition to
//! the next state. It never touches timers or subscribers; those side effects
//! belong to the store that calls it.

use crate::notifications::toast::{Toast, ToastId, ToastState, ToastUpdate};

/// A state transition understood by [`reduce`]
#[derive(Debug, Clone)]
pub enum Transition {
    /// Prepend a new toast, dropping the oldest entries beyond the limit
    Add(Toast),

    /// Shallow-merge changes into an open toast
    Update {
        id: ToastId,
        changes: ToastUpdate,
    },

    /// Mark one toast (or every toast when `None`) as closed
    Dismiss(Option<ToastId>),

    /// Delete one toast (or every toast when `None`)
    Remove(Option<ToastId>),
}

impl Transition {
    /// Short name used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            Transition::Add(_) => "add",
            Transition::Update { .. } => "update",
            Transition::Dismiss(_) => "dismiss",
            Transition::Remove(_) => "remove",
        }
    }
}

/// Compute the state that follows `state` after `transition`
///
/// Transitions naming an unknown id leave the state untouched. An update to a
/// toast that has already been dismissed is ignored so a closed toast can only
/// move on to removal.
pub fn reduce(mut state: ToastState, transition: Transition, limit: usize) -> ToastState {
    match transition {
        Transition::Add(toast) => {
            state.toasts.retain(|existing| existing.id != toast.id);
            state.toasts.insert(0, toast);
            state.toasts.truncate(limit);
        }
        Transition::Update { id, changes } => {
            if let Some(toast) = state
                .toasts
                .iter_mut()
                .find(|toast| toast.id == id && toast.open)
            {
                toast.merge(&changes);
            }
        }
        Transition::Dismiss(Some(id)) => {
            if let Some(toast) = state.toasts.iter_mut().find(|toast| toast.id == id) {
                toast.close();
            }
        }
        Transition::Dismiss(None) => {
            state.toasts.iter_mut().for_each(Toast::close);
        }
        Transition::Remove(Some(id)) => {
            state.toasts.retain(|toast| toast.id != id);
        }
        Transition::Remove(None) => {
            state.toasts.clear();
        }
    }
    state
}

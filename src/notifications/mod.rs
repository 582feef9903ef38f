//! Ephemeral Toast Notification Store
//!
//! An in-memory store of short-lived UI notifications ("toasts") shared by any
//! number of render surfaces.
//!
//! # Architecture
//!
//! - **IdGenerator**: hands out a fresh id for every toast
//! - **reduce**: pure state transitions (add, update, dismiss, remove)
//! - **RemovalScheduler**: one deferred removal timer per dismissed toast
//! - **SubscriptionRegistry**: observers notified synchronously after each transition
//! - **ToastStore**: the facade tying them together
//!
//! # Example Usage
//!
//! ```no_run
//! use toastd::notifications::{ToastConfig, ToastContent, ToastState, ToastStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ToastStore::new(ToastConfig::default())?;
//!
//! let subscription = store.subscribe(|state: &ToastState| {
//!     println!("{} toasts visible", state.len());
//! });
//!
//! let handle = store.toast(ToastContent::titled("Upload complete"));
//! handle.dismiss();
//! subscription.unsubscribe();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod manager;
pub mod reducer;
pub mod registry;
pub mod scheduler;
pub mod toast;


// Re-export core types for convenience
pub use config::ToastConfig;
pub use error::{ToastError, ToastResult};
pub use manager::{StoreStats, Subscription, ToastHandle, ToastStore};
pub use reducer::{reduce, Transition};
pub use registry::{Subscriber, SubscriptionId};
pub use toast::{
    OpenChangeHandler, Toast, ToastActionButton, ToastContent, ToastId, ToastState, ToastUpdate,
    ToastVariant,
};

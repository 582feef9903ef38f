//! Ephemeral toast notification store
//!
//! The store keeps a bounded, newest-first list of toasts, publishes every
//! state change to its subscribers and removes dismissed toasts after a
//! configurable delay. The remaining modules drive the store from the
//! `toastd` command line tool.

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod logging;
pub mod notifications;

pub use notifications::{
    ToastConfig, ToastContent, ToastError, ToastHandle, ToastId, ToastResult, ToastState,
    ToastStore, ToastUpdate, ToastVariant,
};

//! Toast Store Configuration

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::notifications::error::{ToastError, ToastResult};

/// Default number of toasts visible at once
pub const DEFAULT_LIMIT: usize = 1;

/// Default delay between dismissal and removal, in milliseconds
pub const DEFAULT_REMOVE_DELAY_MS: u64 = 1_000_000;

/// Store-wide constants, fixed when the store is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ToastConfig {
    /// Maximum number of toasts retained in the active sequence
    pub limit: usize,

    /// Delay before a dismissed toast is removed, in milliseconds
    pub remove_delay_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            remove_delay_ms: DEFAULT_REMOVE_DELAY_MS,
        }
    }
}

impl ToastConfig {
    pub fn new(limit: usize, remove_delay: Duration) -> Self {
        Self {
            limit,
            remove_delay_ms: remove_delay.as_millis() as u64,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_remove_delay(mut self, remove_delay: Duration) -> Self {
        self.remove_delay_ms = remove_delay.as_millis() as u64;
        self
    }

    pub fn remove_delay(&self) -> Duration {
        Duration::from_millis(self.remove_delay_ms)
    }

    pub fn validate(&self) -> ToastResult<()> {
        if self.limit == 0 {
            return Err(ToastError::invalid_config("limit must be at least 1"));
        }
        Ok(())
    }
}

//! Toast identifier generation

use std::sync::atomic::{AtomicU64, Ordering};
use crate::notifications::toast::ToastId;

/// Upper bound of the id counter; ids cycle back to zero once it is reached
pub const ID_CYCLE: u64 = (1 << 53) - 1;

/// Produces a fresh id for every toast request
///
/// Ids are decimal strings of a counter that starts at 1 and wraps modulo
/// [`ID_CYCLE`].
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the counter at `last`, so the next id issued is `last + 1`
    pub fn starting_after(last: u64) -> Self {
        Self {
            counter: AtomicU64::new(last % ID_CYCLE),
        }
    }

    pub fn next_id(&self) -> ToastId {
        let advance = |current: u64| Some((current + 1) % ID_CYCLE);
        let previous = match self
            .counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, advance)
        {
            Ok(previous) | Err(previous) => previous,
        };
        ToastId::from((previous + 1) % ID_CYCLE)
    }
}

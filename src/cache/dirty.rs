//! Dirty Flag Module
//!
//! Marks unflushed mutations for the persistence scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// == Dirty Flag ==
/// Shared marker set by every store mutation and consumed by the scheduler.
///
/// Clones share the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    /// Creates a clear flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the store changed since the last flush.
    pub fn mark(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clears the flag and returns whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Returns whether the flag is set without clearing it.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

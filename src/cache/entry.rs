//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with read counting.

use crate::cache::Variant;

/// Highest access count an entry can carry. The read that finds this value is
/// the last one the entry survives.
pub const MAX_ACCESS_COUNT: u8 = 99;

// == Read Outcome ==
/// What the eviction rule decided after a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Counter was incremented, entry stays
    Retained,
    /// Entry was read for the last time and must be removed
    Evict,
}

// == Cache Entry ==
/// Represents a single cache entry with its value and read counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The stored value
    pub value: Variant,
    /// Number of reads served so far, in `0..=MAX_ACCESS_COUNT`
    pub access_count: u8,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a fresh entry that has not been read yet.
    pub fn new(value: Variant) -> Self {
        Self {
            value,
            access_count: 0,
        }
    }

    // == Record Read ==
    /// Applies the eviction rule for one read.
    ///
    /// Counter values 0 through 99 each correspond to one read, so an entry
    /// serves exactly 100 reads. The read that finds the counter at
    /// `MAX_ACCESS_COUNT` still returns the value but reports `Evict`.
    pub fn record_read(&mut self) -> ReadOutcome {
        if self.access_count >= MAX_ACCESS_COUNT {
            ReadOutcome::Evict
        } else {
            self.access_count += 1;
            ReadOutcome::Retained
        }
    }
}

//! Read Statistics
//!
//! One token read can return several typed entries, so lookups and served
//! entries are counted separately.

use serde::Serialize;

/// Counters maintained by [`CacheStore::read`](crate::cache::CacheStore::read).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Token lookups, whether or not anything matched
    pub reads: u64,
    /// Lookups whose token matched no entry
    pub misses: u64,
    /// Entries returned across all lookups
    pub entries_served: u64,
    /// Entries removed on their last permitted read
    pub evictions: u64,
    /// Entries currently stored
    pub total_entries: usize,
}

impl CacheStats {
    /// Fraction of lookups that matched at least one entry.
    pub fn hit_rate(&self) -> f64 {
        match self.reads {
            0 => 0.0,
            reads => (reads - self.misses) as f64 / reads as f64,
        }
    }

    /// Average number of entries returned per matching lookup.
    pub fn entries_per_hit(&self) -> f64 {
        match self.reads - self.misses {
            0 => 0.0,
            hits => self.entries_served as f64 / hits as f64,
        }
    }

    /// Records one lookup that returned `served` entries, `evicted` of which
    /// were removed afterwards.
    pub fn record_read(&mut self, served: usize, evicted: usize) {
        self.reads += 1;
        if served == 0 {
            self.misses += 1;
        }
        self.entries_served += served as u64;
        self.evictions += evicted as u64;
    }
}

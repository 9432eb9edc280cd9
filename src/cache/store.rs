//! Cache Store Module
//!
//! Main cache engine: typed entry table, token resolution on read/delete,
//! hot-key eviction, and dirty signalling for the persistence scheduler.

use std::collections::HashMap;

use crate::cache::snapshot::SnapshotRef;
use crate::cache::{
    CacheEntry, CacheStats, DirtyFlag, KeyResolver, ReadOutcome, Snapshot, Variant,
};
use crate::error::{CacheError, Result};

// == Cache Pair ==
/// A copy of one entry's key and value, handed out by reads and listings.
#[derive(Debug, Clone, PartialEq)]
pub struct CachePair {
    pub key: Variant,
    pub value: Variant,
}

// == Cache Store ==
/// Typed key-value storage with count-based eviction.
///
/// The store itself is not synchronised; callers share it behind a single
/// mutex so every operation observes the whole table exclusively.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Entries keyed by typed key, each carrying its read counter
    entries: HashMap<Variant, CacheEntry>,
    /// Read statistics
    stats: CacheStats,
    /// Set on every mutation, consumed by the persistence scheduler
    dirty: DirtyFlag,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with its own dirty flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the flag this store marks on mutation.
    pub fn dirty_flag(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    // == Create ==
    /// Inserts a new entry with an access count of zero.
    ///
    /// Fails with `Conflict` if the exact key is already present; the
    /// existing value is left untouched.
    pub fn create(&mut self, key: Variant, value: Variant) -> Result<()> {
        if self.entries.contains_key(&key) {
            return Err(CacheError::Conflict(key.to_string()));
        }

        self.entries.insert(key, CacheEntry::new(value));
        self.dirty.mark();
        Ok(())
    }

    // == Update ==
    /// Replaces the value of an existing entry, keeping its access count.
    pub fn update(&mut self, key: &Variant, value: Variant) -> Result<()> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.value = value;
                self.dirty.mark();
                Ok(())
            }
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Read ==
    /// Returns every entry `token` resolves to, in candidate order.
    ///
    /// Each matched entry is counted independently; an entry read for the
    /// 100th time is returned and then removed.
    pub fn read(&mut self, token: &str) -> Result<Vec<CachePair>> {
        let mut matches = Vec::new();
        let mut evicted = 0;

        for candidate in KeyResolver::candidates(token) {
            let Some(entry) = self.entries.get_mut(&candidate) else {
                continue;
            };

            matches.push(CachePair {
                key: candidate.clone(),
                value: entry.value.clone(),
            });

            if entry.record_read() == ReadOutcome::Evict {
                self.entries.remove(&candidate);
                evicted += 1;
            }
        }

        self.stats.record_read(matches.len(), evicted);
        if matches.is_empty() {
            return Err(CacheError::NotFound(token.to_string()));
        }

        self.dirty.mark();
        Ok(matches)
    }

    // == Delete ==
    /// Removes every entry `token` resolves to, regardless of access count.
    ///
    /// Returns the number of entries removed.
    pub fn delete(&mut self, token: &str) -> Result<usize> {
        let removed = KeyResolver::candidates(token)
            .iter()
            .filter(|candidate| self.entries.remove(*candidate).is_some())
            .count();

        if removed == 0 {
            return Err(CacheError::NotFound(token.to_string()));
        }

        self.dirty.mark();
        Ok(removed)
    }

    // == Delete All ==
    /// Clears the store. Always succeeds, even when already empty.
    pub fn delete_all(&mut self) {
        self.entries.clear();
        self.dirty.mark();
    }

    // == List ==
    /// Returns a copy of every entry in unspecified order.
    ///
    /// Does not count as a read and does not mark the store dirty.
    pub fn list(&self) -> Vec<CachePair> {
        self.entries
            .iter()
            .map(|(key, entry)| CachePair {
                key: key.clone(),
                value: entry.value.clone(),
            })
            .collect()
    }

    // == Access Count ==
    /// Returns the read counter of the entry stored under exactly `key`.
    pub fn access_count(&self, key: &Variant) -> Option<u8> {
        self.entries.get(key).map(|entry| entry.access_count)
    }

    // == Snapshot ==
    /// Encodes both tables into one blob.
    pub fn snapshot_blob(&self) -> Result<Vec<u8>> {
        SnapshotRef::capture(&self.entries).encode()
    }

    // == Restore ==
    /// Replaces the store contents with a decoded snapshot.
    ///
    /// On error the store is left unchanged. Restoring does not mark the
    /// store dirty since the contents already match durable storage.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<usize> {
        self.entries = snapshot.into_table()?;
        Ok(self.entries.len())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats.clone()
        }
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

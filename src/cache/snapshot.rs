//! Snapshot Module
//!
//! Serialized image of the store: the entry table followed by the
//! access-count table, encoded as a single JSON document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheEntry, Variant, MAX_ACCESS_COUNT};
use crate::error::{CacheError, Result};

/// Borrowed view of the live tables, encoded while the store lock is held.
#[derive(Debug, Serialize)]
pub(crate) struct SnapshotRef<'a> {
    pub entries: Vec<(&'a Variant, &'a Variant)>,
    pub access_counts: Vec<(&'a Variant, u8)>,
}

impl<'a> SnapshotRef<'a> {
    pub fn capture(table: &'a HashMap<Variant, CacheEntry>) -> Self {
        Self {
            entries: table.iter().map(|(k, e)| (k, &e.value)).collect(),
            access_counts: table.iter().map(|(k, e)| (k, e.access_count)).collect(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| CacheError::Snapshot(format!("encode failed: {}", e)))
    }
}

// == Snapshot ==
/// Owned snapshot decoded from a blob.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    pub entries: Vec<(Variant, Variant)>,
    pub access_counts: Vec<(Variant, u8)>,
}

impl Snapshot {
    /// Decodes a blob produced by a flush.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| CacheError::Snapshot(format!("decode failed: {}", e)))
    }

    /// Rebuilds the entry table, rejecting snapshots whose two tables do not
    /// cover the same keys or whose counters are out of range.
    pub fn into_table(self) -> Result<HashMap<Variant, CacheEntry>> {
        let mut counts: HashMap<Variant, u8> = HashMap::with_capacity(self.access_counts.len());
        for (key, count) in self.access_counts {
            if count > MAX_ACCESS_COUNT {
                return Err(CacheError::Snapshot(format!(
                    "access count {} for key '{}' exceeds {}",
                    count, key, MAX_ACCESS_COUNT
                )));
            }
            counts.insert(key, count);
        }

        if counts.len() != self.entries.len() {
            return Err(CacheError::Snapshot(format!(
                "table size mismatch: {} entries, {} access counts",
                self.entries.len(),
                counts.len()
            )));
        }

        let mut table = HashMap::with_capacity(self.entries.len());
        for (key, value) in self.entries {
            let access_count = counts.remove(&key).ok_or_else(|| {
                CacheError::Snapshot(format!("key '{}' has no access count", key))
            })?;
            table.insert(
                key,
                CacheEntry {
                    value,
                    access_count,
                },
            );
        }

        Ok(table)
    }
}

//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CachePair, CacheStats};

/// One key/value pair as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachePairResponse {
    pub key: Value,
    pub value: Value,
}

impl From<&CachePair> for CachePairResponse {
    fn from(pair: &CachePair) -> Self {
        Self {
            key: pair.key.to_json(),
            value: pair.value.to_json(),
        }
    }
}

/// Response body for listing the cache (GET /cache/)
#[derive(Debug, Clone, Serialize)]
pub struct CacheListResponse {
    pub cache: Vec<CachePairResponse>,
}

impl CacheListResponse {
    pub fn new(pairs: &[CachePair]) -> Self {
        Self {
            cache: pairs.iter().map(CachePairResponse::from).collect(),
        }
    }
}

/// Response body for reading a token (GET /cache/*token)
///
/// A single match is sent as a bare object, several as an array, and a
/// match that yields no payload as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReadResponse {
    Empty,
    Single(CachePairResponse),
    Multiple(Vec<CachePairResponse>),
}

impl ReadResponse {
    pub fn new(pairs: &[CachePair]) -> Self {
        match pairs {
            [] => ReadResponse::Empty,
            [pair] => ReadResponse::Single(pair.into()),
            many => ReadResponse::Multiple(many.iter().map(CachePairResponse::from).collect()),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Token lookups served
    pub reads: u64,
    /// Lookups that matched nothing
    pub misses: u64,
    /// Entries returned across all lookups
    pub entries_served: u64,
    /// Entries evicted after their last permitted read
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Fraction of lookups that matched at least one entry
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            reads: stats.reads,
            misses: stats.misses,
            entries_served: stats.entries_served,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

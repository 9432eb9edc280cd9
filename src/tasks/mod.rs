//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the server.
//!
//! # Tasks
//! - Persistence: Coalesces store mutations into periodic snapshot writes

mod persistence;

pub use persistence::{PersistenceHandle, PersistenceMetrics, PersistenceScheduler};

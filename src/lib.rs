//! Typed Cache - An HTTP key-value cache with typed keys
//!
//! Keys and values keep their JSON kind, hot entries evict themselves after
//! 100 reads, and state is snapshotted to disk in the background.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{PersistenceHandle, PersistenceScheduler};

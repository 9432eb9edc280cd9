//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SERVER_PORT: u16 = 8088;
const DEFAULT_SNAPSHOT_PATH: &str = "/tmp/typed_cache.snapshot";
const DEFAULT_PERSIST_INTERVAL_MS: u64 = 500;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Location of the snapshot blob
    pub snapshot_path: PathBuf,
    /// Persistence scheduler tick in milliseconds
    pub persist_interval_ms: u64,
    /// Whether to create the demo entries at boot
    pub seed_demo: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8088)
    /// - `SNAPSHOT_PATH` - Snapshot file location (default: /tmp/typed_cache.snapshot)
    /// - `PERSIST_INTERVAL_MS` - Snapshot flush interval (default: 500)
    /// - `SEED_DEMO` - Seed demo entries at boot (default: false)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
            persist_interval_ms: env::var("PERSIST_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_PERSIST_INTERVAL_MS),
            seed_demo: env::var("SEED_DEMO")
                .ok()
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Persistence tick as a Duration.
    pub fn persist_interval(&self) -> Duration {
        Duration::from_millis(self.persist_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            persist_interval_ms: DEFAULT_PERSIST_INTERVAL_MS,
            seed_demo: false,
        }
    }
}

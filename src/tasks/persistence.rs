//! Snapshot Persistence Task
//!
//! Background task that coalesces store mutations into at most one snapshot
//! write per interval, plus a final write on shutdown.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::cache::{DirtyFlag, SharedCache, Snapshot};
use crate::error::{CacheError, Result};

// == Metrics ==
/// Counters for flush activity since the scheduler was created.
#[derive(Debug, Default)]
pub struct PersistenceMetrics {
    /// Snapshot writes that completed
    pub flushes: AtomicU64,
    /// Snapshot writes that failed
    pub flush_errors: AtomicU64,
}

impl PersistenceMetrics {
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    pub fn flush_errors(&self) -> u64 {
        self.flush_errors.load(Ordering::Relaxed)
    }
}

// == Persistence Scheduler ==
/// Writes the store to durable storage and restores it at boot.
#[derive(Debug, Clone)]
pub struct PersistenceScheduler {
    cache: SharedCache,
    dirty: DirtyFlag,
    path: PathBuf,
    interval: Duration,
    metrics: Arc<PersistenceMetrics>,
}

impl PersistenceScheduler {
    /// Creates a scheduler for `cache` that watches `dirty` and writes to
    /// `path` at most once per `interval`.
    pub fn new(
        cache: SharedCache,
        dirty: DirtyFlag,
        path: impl Into<PathBuf>,
        interval: Duration,
    ) -> Self {
        Self {
            cache,
            dirty,
            path: path.into(),
            interval,
            metrics: Arc::new(PersistenceMetrics::default()),
        }
    }

    pub fn metrics(&self) -> Arc<PersistenceMetrics> {
        self.metrics.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Load ==
    /// Restores the store from the snapshot file, if one exists.
    ///
    /// Read and decode failures are logged and the store keeps its current
    /// (empty at boot) contents. Returns the number of entries restored.
    pub async fn load_snapshot(&self) -> usize {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No snapshot at {}, starting empty", self.path.display());
                return 0;
            }
            Err(e) => {
                error!("Unable to read snapshot {}: {}", self.path.display(), e);
                return 0;
            }
        };

        let snapshot = match Snapshot::decode(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Unable to unpersist {}: {}", self.path.display(), e);
                return 0;
            }
        };

        let mut cache = self.cache.lock().await;
        match cache.restore(snapshot) {
            Ok(count) => {
                info!("Restored {} items from {}", count, self.path.display());
                count
            }
            Err(e) => {
                error!("Unable to unpersist {}: {}", self.path.display(), e);
                0
            }
        }
    }

    // == Flush If Dirty ==
    /// Runs one scheduler tick: clears the dirty flag and, if it was set,
    /// writes a snapshot.
    ///
    /// A failed write is logged and not retried; the flag stays cleared
    /// until the next mutation. Returns whether a write was attempted.
    pub async fn flush_if_dirty(&self) -> bool {
        if !self.dirty.take() {
            debug!("Snapshot clean, nothing to persist");
            return false;
        }

        if let Err(e) = self.persist().await {
            error!("Unable to persist cache, waiting for next mutation: {}", e);
        }
        true
    }

    // == Flush ==
    /// Writes a snapshot unconditionally. Returns the number of entries written.
    pub async fn flush(&self) -> Result<usize> {
        self.dirty.take();
        self.persist().await
    }

    async fn persist(&self) -> Result<usize> {
        let result = self.write_snapshot().await;

        match &result {
            Ok(count) => {
                self.metrics.flushes.fetch_add(1, Ordering::Relaxed);
                info!("Persisted {} items", count);
            }
            Err(_) => {
                self.metrics.flush_errors.fetch_add(1, Ordering::Relaxed);
            }
        }

        result
    }

    async fn write_snapshot(&self) -> Result<usize> {
        // Lock held only while encoding; file I/O happens after release
        let (blob, count) = {
            let cache = self.cache.lock().await;
            (cache.snapshot_blob()?, cache.len())
        };

        write_atomic(&self.path, &blob).await?;
        Ok(count)
    }

    // == Start ==
    /// Spawns the background loop and returns a handle used to stop it.
    pub fn start(self) -> PersistenceHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let metrics = self.metrics.clone();
        let handle = tokio::spawn(self.run(shutdown_rx));

        PersistenceHandle {
            shutdown_tx,
            handle,
            metrics,
        }
    }

    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            interval_ms = self.interval.as_millis() as u64,
            path = %self.path.display(),
            "Persistence task started"
        );

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    // A dropped sender also means shutdown
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.flush_if_dirty().await;
                }
            }
        }

        if let Err(e) = self.flush().await {
            error!("Final snapshot failed: {}", e);
        }
        info!("Persistence task done");
    }
}

/// Writes `bytes` to a sibling temp file and renames it over `path`.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp: OsString = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    tokio::fs::write(&temp, bytes)
        .await
        .map_err(|e| CacheError::Snapshot(format!("write {} failed: {}", temp.display(), e)))?;

    tokio::fs::rename(&temp, path)
        .await
        .map_err(|e| CacheError::Snapshot(format!("rename to {} failed: {}", path.display(), e)))
}

// == Persistence Handle ==
/// Handle to the running persistence task.
#[derive(Debug)]
pub struct PersistenceHandle {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
    metrics: Arc<PersistenceMetrics>,
}

impl PersistenceHandle {
    pub fn metrics(&self) -> Arc<PersistenceMetrics> {
        self.metrics.clone()
    }

    /// Signals the task to stop, waits for its final flush, and returns the
    /// collected metrics.
    pub async fn shutdown(self) -> Arc<PersistenceMetrics> {
        let _ = self.shutdown_tx.send(true);

        if let Err(e) = self.handle.await {
            warn!("Persistence task ended abnormally: {}", e);
        }

        self.metrics
    }
}

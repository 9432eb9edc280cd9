//! Typed Cache - An HTTP key-value cache with typed keys
//!
//! Serves the cache over HTTP and snapshots it to disk in the background.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use typed_cache::api::create_router;
use typed_cache::cache::{seed_demo_entries, CacheStore};
use typed_cache::{AppState, Config, PersistenceScheduler};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create cache store and restore the last snapshot
/// 4. Optionally seed demo entries
/// 5. Start background persistence task
/// 6. Serve HTTP until SIGINT/SIGTERM/SIGHUP
/// 7. Stop the persistence task, which writes a final snapshot
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typed_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Typed Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, snapshot_path={}, persist_interval={}ms, seed_demo={}",
        config.server_port,
        config.snapshot_path.display(),
        config.persist_interval_ms,
        config.seed_demo
    );

    let state = AppState::new(CacheStore::new());
    let scheduler = PersistenceScheduler::new(
        state.cache.clone(),
        state.dirty.clone(),
        config.snapshot_path.clone(),
        config.persist_interval(),
    );

    scheduler.load_snapshot().await;

    if config.seed_demo {
        let created = seed_demo_entries(&mut *state.cache.lock().await);
        info!("Seeded {} demo entries", created);
    }

    let persistence = scheduler.start();
    info!("Background persistence task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let metrics = persistence.shutdown().await;
    info!(
        "Server shutdown complete: {} snapshots written, {} failed",
        metrics.flushes(),
        metrics.flush_errors()
    );

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C, SIGTERM or SIGHUP).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = unix_signal(signal::unix::SignalKind::terminate(), "SIGTERM");
    #[cfg(unix)]
    let hangup = unix_signal(signal::unix::SignalKind::hangup(), "SIGHUP");

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    #[cfg(not(unix))]
    let hangup = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
        _ = hangup => {
            info!("Received SIGHUP, initiating shutdown...");
        }
    }
}

/// Resolves on the first delivery of `kind`, or never if the handler cannot
/// be installed.
#[cfg(unix)]
async fn unix_signal(kind: signal::unix::SignalKind, name: &str) {
    match signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::error!("Failed to install {} handler: {}", name, e);
            std::future::pending::<()>().await;
        }
    }
}

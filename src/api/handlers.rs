//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStore, DirtyFlag, SharedCache};
use crate::error::{CacheError, Result};
use crate::models::{
    CacheListResponse, CachePairRequest, HealthResponse, ReadResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache store behind one mutex, so every operation holds the
/// whole table exclusively.
#[derive(Clone)]
pub struct AppState {
    /// Exclusive-lock cache store
    pub cache: SharedCache,
    /// Flag the store marks on mutation, observed by the persistence task
    pub dirty: DirtyFlag,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        let dirty = cache.dirty_flag();
        Self {
            cache: Arc::new(Mutex::new(cache)),
            dirty,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CacheStore::new())
    }
}

/// Handler for GET /cache/
///
/// Lists every entry without counting it as a read.
pub async fn list_handler(State(state): State<AppState>) -> Json<CacheListResponse> {
    let pairs = state.cache.lock().await.list();
    Json(CacheListResponse::new(&pairs))
}

/// Handler for GET /cache/*token
///
/// Returns every entry the token resolves to.
pub async fn read_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ReadResponse>> {
    let pairs = state.cache.lock().await.read(&token)?;
    Ok(Json(ReadResponse::new(&pairs)))
}

/// Handler for POST /cache/
///
/// Creates an entry and points `Location` at its token. The token is
/// percent-encoded so keys containing `/`, `?` or `#` still resolve.
pub async fn create_handler(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let (key, value) = CachePairRequest::from_body(&body)?.into_pair()?;
    let location = format!("/cache/{}", urlencoding::encode(&key.to_string()));

    state.cache.lock().await.create(key, value)?;

    let mut response = StatusCode::CREATED.into_response();
    match HeaderValue::from_bytes(location.as_bytes()) {
        Ok(value) => {
            response.headers_mut().insert(header::LOCATION, value);
        }
        Err(e) => warn!("Omitting Location header for {:?}: {}", location, e),
    }
    Ok(response)
}

/// Handler for PUT /cache/*token
///
/// Replaces the value of an existing entry. The body's key, rendered as a
/// token, must equal the path token.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> Result<StatusCode> {
    let (key, value) = CachePairRequest::from_body(&body)?.into_pair()?;

    if key.to_string() != token {
        return Err(CacheError::NotAcceptable(format!(
            "Key '{}' does not match path '{}'",
            key, token
        )));
    }

    state.cache.lock().await.update(&key, value)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /cache/*token
///
/// Removes every entry the token resolves to.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode> {
    let removed = state.cache.lock().await.delete(&token)?;
    debug!("Deleted {} entries for '{}'", removed, token);
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /cache/
///
/// Clears the cache. Always succeeds.
pub async fn delete_all_handler(State(state): State<AppState>) -> StatusCode {
    state.cache.lock().await.delete_all();
    StatusCode::NO_CONTENT
}

/// Handler for any method on /cache
///
/// Sends clients to the collection path with the trailing slash.
pub async fn cache_root_redirect() -> Redirect {
    Redirect::permanent("/cache/")
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.lock().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

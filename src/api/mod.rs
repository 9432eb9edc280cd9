//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `/cache` - Redirect to `/cache/`
//! - `GET /cache/` - List all entries
//! - `POST /cache/` - Create an entry
//! - `DELETE /cache/` - Clear the cache
//! - `GET /cache/*token` - Read entries matching a token
//! - `PUT /cache/*token` - Update an entry
//! - `DELETE /cache/*token` - Delete entries matching a token
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

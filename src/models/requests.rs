//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::Variant;
use crate::error::{CacheError, Result};

/// Request body for create (POST /cache/) and update (PUT /cache/*token)
///
/// # Fields
/// - `key`: Any scalar JSON value
/// - `value`: Any JSON value; absent means `null`
#[derive(Debug, Clone, Deserialize)]
pub struct CachePairRequest {
    pub key: Value,
    #[serde(default)]
    pub value: Value,
}

impl CachePairRequest {
    /// Decodes a raw request body.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| CacheError::NotAcceptable(format!("Invalid payload: {}", e)))
    }

    /// Converts into a typed key and value.
    ///
    /// Keys must be strings, numbers or booleans.
    pub fn into_pair(self) -> Result<(Variant, Variant)> {
        let key = Variant::from_json(self.key);
        if !key.is_scalar() {
            return Err(CacheError::NotAcceptable(format!(
                "Key must be a string, number or boolean, got {}",
                key
            )));
        }
        Ok((key, Variant::from_json(self.value)))
    }
}

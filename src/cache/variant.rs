//! Variant Module
//!
//! Tagged union used for both keys and values of the cache.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// == Variant ==
/// A key or value of one of the supported kinds.
///
/// Two variants are equal only when both kind and value match, so the
/// string `"123"` and the integer `123` are distinct keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Variant {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Compact JSON text of a value with no scalar kind (null, array, object)
    Opaque(String),
}

/// Discriminant of a [`Variant`], in candidate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariantKind {
    String,
    Integer,
    Float,
    Boolean,
    Opaque,
}

impl Variant {
    /// Returns the kind of this variant.
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::String(_) => VariantKind::String,
            Variant::Integer(_) => VariantKind::Integer,
            Variant::Float(_) => VariantKind::Float,
            Variant::Boolean(_) => VariantKind::Boolean,
            Variant::Opaque(_) => VariantKind::Opaque,
        }
    }

    /// True for kinds that may be used as a cache key.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Variant::Opaque(_))
    }
}

/// Bit pattern used for float equality and hashing; `-0.0` folds onto `0.0`.
fn float_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Variant::String(a), Variant::String(b)) => a == b,
            (Variant::Integer(a), Variant::Integer(b)) => a == b,
            (Variant::Float(a), Variant::Float(b)) => float_bits(*a) == float_bits(*b),
            (Variant::Boolean(a), Variant::Boolean(b)) => a == b,
            (Variant::Opaque(a), Variant::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Variant {}

impl Hash for Variant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Variant::String(s) | Variant::Opaque(s) => s.hash(state),
            Variant::Integer(i) => i.hash(state),
            Variant::Float(f) => float_bits(*f).hash(state),
            Variant::Boolean(b) => b.hash(state),
        }
    }
}

// == Canonical Token ==
/// Renders the token a client would put in a URL path to address this key.
impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::String(s) | Variant::Opaque(s) => f.write_str(s),
            Variant::Integer(i) => write!(f, "{}", i),
            Variant::Float(x) => write!(f, "{}", x),
            Variant::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::String(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Variant::Integer(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Float(value)
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Boolean(value)
    }
}

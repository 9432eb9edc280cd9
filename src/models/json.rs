//! JSON conversions for [`Variant`]
//!
//! Maps decoded JSON values onto variant kinds and back.

use serde_json::{Number, Value};

use crate::cache::Variant;

impl Variant {
    /// Decodes a JSON value.
    ///
    /// Numbers that fit an `i64` become integers, all other numbers floats.
    /// Null, arrays and objects are kept as opaque JSON text.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => Variant::String(s),
            Value::Bool(b) => Variant::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Variant::Integer(i),
                None => Variant::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            other => Variant::Opaque(other.to_string()),
        }
    }

    /// Encodes this variant as a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Variant::String(s) => Value::String(s.clone()),
            Variant::Integer(i) => Value::from(*i),
            Variant::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            Variant::Boolean(b) => Value::Bool(*b),
            Variant::Opaque(text) => {
                serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()))
            }
        }
    }
}

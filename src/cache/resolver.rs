//! Key Resolver Module
//!
//! Keys reach the cache as URL path segments, but stored keys may be strings,
//! integers, floats or booleans. The resolver turns one raw token into every
//! typed key it could stand for.

use crate::cache::Variant;

/// A single parse attempt: returns the candidate or `None` if the token does
/// not parse as that kind.
type TokenParser = fn(&str) -> Option<Variant>;

/// Parse attempts in candidate order: String, Integer, Float, Boolean.
const PARSERS: [TokenParser; 4] = [parse_string, parse_integer, parse_float, parse_boolean];

fn parse_string(token: &str) -> Option<Variant> {
    Some(Variant::String(token.to_string()))
}

fn parse_integer(token: &str) -> Option<Variant> {
    token.parse::<i64>().ok().map(Variant::Integer)
}

fn parse_float(token: &str) -> Option<Variant> {
    token.parse::<f64>().ok().map(Variant::Float)
}

fn parse_boolean(token: &str) -> Option<Variant> {
    match token {
        "true" => Some(Variant::Boolean(true)),
        "false" => Some(Variant::Boolean(false)),
        _ => None,
    }
}

// == Key Resolver ==
/// Resolves raw string tokens into typed key candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyResolver;

impl KeyResolver {
    /// Returns every variant `token` could represent.
    ///
    /// The string interpretation is always first; a kind that fails to parse
    /// is simply absent from the result.
    pub fn candidates(token: &str) -> Vec<Variant> {
        PARSERS.iter().filter_map(|parse| parse(token)).collect()
    }
}

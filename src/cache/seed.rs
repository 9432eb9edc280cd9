//! Demo Seeding
//!
//! Sample entries created at boot when `SEED_DEMO` is enabled.

use tracing::debug;

use crate::cache::{CacheStore, Variant};

/// Creates the demo entries, skipping keys that already exist.
///
/// The integer, float and boolean keys overlap on purpose so that reading
/// `/cache/123` shows a multi-kind match. Returns the number created.
pub fn seed_demo_entries(store: &mut CacheStore) -> usize {
    let demo: [(Variant, Variant); 6] = [
        ("foo".into(), "bar".into()),
        ("baz".into(), 100000000.000000001.into()),
        ("quux".into(), "Hello, world!".into()),
        (123i64.into(), "Integer".into()),
        (123.0.into(), "Float".into()),
        (false.into(), "Boolean".into()),
    ];

    demo.into_iter()
        .filter(|(key, value)| match store.create(key.clone(), value.clone()) {
            Ok(()) => true,
            Err(e) => {
                debug!("Skipping demo entry: {}", e);
                false
            }
        })
        .count()
}

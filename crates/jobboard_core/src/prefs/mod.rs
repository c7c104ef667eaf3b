//! Durable user preferences.
//!
//! This module provides:
//! - `PreferenceStore`: string-keyed storage contract (get/set/remove)
//! - `MemoryStore`: in-process store for tests and ephemeral sessions
//! - `FileStore`: JSON file store with atomic rewrites
//! - Typed records for the keys the engine uses (`SavedFilters`, `OrderRecord`)
//!
//! Malformed stored values are treated as absent so that a corrupted file
//! never prevents startup.

mod keys;
mod records;
mod store;

pub use keys::{page_order_key, GLOBAL_ORDER_KEY, PAGE_ORDER_PREFIX, USER_FILTERS_KEY};
pub use records::{OrderEntry, OrderRecord, SavedFilters};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError, StoreResult};

/// Read and decode a JSON value, treating malformed data as absent.
pub fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    S: PreferenceStore + ?Sized,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed preference '{}': {}", key, e);
            None
        }
    }
}

/// Encode a value as JSON and store it.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: serde::Serialize,
    S: PreferenceStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

//! Job board core library.
//!
//! Combines a paginated remote job source with durable local preferences
//! (search term, category, sort order, manual drag ordering) into one
//! displayed list.
//!
//! Front ends drive a [`engine::ReconciliationEngine`] with
//! [`engine::Event`]s and render [`engine::ReconciliationEngine::displayed_jobs`].

pub mod config;
pub mod drag;
pub mod engine;
pub mod filter;
pub mod logging;
pub mod models;
pub mod prefs;
pub mod sort;
pub mod source;

/// Returns the library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }
}

//! Preference key names.
//!
//! These names are shared with stores written by earlier versions of the
//! board, so they must not change.

/// Selection snapshot (`SavedFilters`).
pub const USER_FILTERS_KEY: &str = "userFilters";

/// Most recent manual order, regardless of page.
pub const GLOBAL_ORDER_KEY: &str = "orderedJobs";

/// Prefix of the page-scoped manual order keys.
pub const PAGE_ORDER_PREFIX: &str = "orderedJobs-page";

/// Key holding the manual order for `page`.
pub fn page_order_key(page: u32) -> String {
    format!("{}{}", PAGE_ORDER_PREFIX, page)
}

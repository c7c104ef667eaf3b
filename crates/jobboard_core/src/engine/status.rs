//! What the list area should show.

/// Hint shown on the sort control while a manual order is in use.
pub const SORT_LOCKED_HINT: &str = "To use SortDropdown, please clear filters first.";

/// Summary of the list area, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing fetched yet.
    Idle,
    Loading,
    /// The last fetch failed; carries the user message.
    Error(String),
    /// The last fetch returned no jobs at all.
    NoJobsAvailable,
    /// Jobs were fetched but none match the search term.
    NoSearchResults(String),
    /// Jobs were fetched but none match the category.
    NoFilterResults,
    Ready,
}

impl ViewStatus {
    /// Text to show in place of (or above) the list, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            ViewStatus::Idle | ViewStatus::Ready => None,
            ViewStatus::Loading => Some("Loading jobs...".to_string()),
            ViewStatus::Error(message) => Some(message.clone()),
            ViewStatus::NoJobsAvailable => Some(
                "No jobs available. Please adjust your search and filter criteria.".to_string(),
            ),
            ViewStatus::NoSearchResults(term) => Some(format!(
                "No jobs found for \"{}\". Please try a different search.",
                term
            )),
            ViewStatus::NoFilterResults => Some(
                "No jobs found for the selected filters. Try resetting filters.".to_string(),
            ),
        }
    }
}

//! Selection state: what the user has asked to see.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category sentinel meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "All";

/// Sort order applied to the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Oldest first.
    DateAsc,
    /// Newest first.
    #[default]
    DateDesc,
    /// Name A-Z.
    NameAsc,
    /// Name Z-A.
    NameDesc,
    /// Category A-Z.
    CategoryAsc,
    /// Category Z-A.
    CategoryDesc,
}

impl SortKey {
    /// Every sort key, in the order the sort control lists them.
    pub const ALL: [SortKey; 6] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::CategoryAsc,
        SortKey::CategoryDesc,
    ];

    /// Wire name, as persisted in `userFilters`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateAsc => "dateAsc",
            Self::DateDesc => "dateDesc",
            Self::NameAsc => "nameAsc",
            Self::NameDesc => "nameDesc",
            Self::CategoryAsc => "categoryAsc",
            Self::CategoryDesc => "categoryDesc",
        }
    }

    /// Label for the sort control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DateDesc => "Date (Newest First)",
            Self::DateAsc => "Date (Oldest First)",
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::CategoryAsc => "Category (A-Z)",
            Self::CategoryDesc => "Category (Z-A)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no sort key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort key '{0}' (expected one of dateDesc, dateAsc, nameAsc, nameDesc, categoryAsc, categoryDesc)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

/// Search term, category, sort key and page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub search_term: String,
    pub category: String,
    pub sort_key: SortKey,
    /// 1-based page number.
    pub page: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_key: SortKey::default(),
            page: 1,
        }
    }
}

impl Selection {
    /// True when no category restriction is active.
    pub fn is_all_categories(&self) -> bool {
        self.category == ALL_CATEGORIES
    }
}

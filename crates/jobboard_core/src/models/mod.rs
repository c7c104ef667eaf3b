//! Data models for the job board.
//!
//! This module contains the core data structures shared by the engine and
//! its collaborators:
//! - `Job` records as delivered by the recruiting API
//! - Selection state (search term, category, sort key, page)
//! - Sort keys and the "All" category sentinel

mod job;
mod selection;

pub(crate) use job::deserialize_id;
pub use job::{parse_timestamp, DateRange, Job, Skill, Tag, UNKNOWN};
pub use selection::{ParseSortKeyError, Selection, SortKey, ALL_CATEGORIES};

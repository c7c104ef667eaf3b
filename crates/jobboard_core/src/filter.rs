//! Search term and category predicates.

use crate::models::{Job, ALL_CATEGORIES};

/// Does `job` match the search term and category?
///
/// The name test is a case-insensitive substring test, so an empty term
/// matches everything. A concrete category only matches jobs carrying a
/// `category` tag with an equal value (case-insensitive).
pub fn matches(job: &Job, search_term: &str, category: &str) -> bool {
    name_matches(job, search_term) && category_matches(job, category)
}

/// Jobs matching `search_term` and `category`, in input order.
pub fn filter_jobs(jobs: &[Job], search_term: &str, category: &str) -> Vec<Job> {
    jobs.iter()
        .filter(|job| matches(job, search_term, category))
        .cloned()
        .collect()
}

fn name_matches(job: &Job, search_term: &str) -> bool {
    job.name
        .to_lowercase()
        .contains(&search_term.to_lowercase())
}

fn category_matches(job: &Job, category: &str) -> bool {
    if category == ALL_CATEGORIES {
        return true;
    }
    job.category()
        .is_some_and(|value| value.to_lowercase() == category.to_lowercase())
}

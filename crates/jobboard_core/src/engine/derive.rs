//! The single derivation rule from state to displayed list.

use crate::filter::filter_jobs;
use crate::models::{Job, Selection};
use crate::prefs::OrderRecord;
use crate::sort::{apply_order, sort_by};

/// Compute the displayed list.
///
/// With no category restriction and a stored order for the page, the
/// stored order wins over the search term and sort key. Otherwise jobs are
/// filtered then sorted.
pub fn derive_displayed(
    jobs: &[Job],
    selection: &Selection,
    page_order: Option<&OrderRecord>,
) -> Vec<Job> {
    match page_order {
        Some(order) if selection.is_all_categories() => apply_order(jobs, order),
        _ => {
            let filtered = filter_jobs(jobs, &selection.search_term, &selection.category);
            sort_by(&filtered, selection.sort_key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortKey;

    fn board() -> Vec<Job> {
        vec![
            Job::new("1", "Backend Developer")
                .with_created_at("2021-03-01T00:00:00Z")
                .with_tag("category", "Engineering"),
            Job::new("2", "Recruiter")
                .with_created_at("2021-01-01T00:00:00Z")
                .with_tag("category", "Human Resources"),
            Job::new("3", "Frontend Developer")
                .with_created_at("2021-02-01T00:00:00Z")
                .with_tag("Category", "engineering"),
        ]
    }

    fn ids(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    #[test]
    fn filter_then_sort_without_order() {
        let selection = Selection {
            category: "Engineering".into(),
            sort_key: SortKey::DateAsc,
            ..Selection::default()
        };
        assert_eq!(ids(&derive_displayed(&board(), &selection, None)), vec!["3", "1"]);
    }

    #[test]
    fn stored_order_wins_under_all() {
        let selection = Selection {
            search_term: "developer".into(),
            sort_key: SortKey::NameAsc,
            ..Selection::default()
        };
        let order = OrderRecord::from_ids(["2", "3", "1"]);
        assert_eq!(
            ids(&derive_displayed(&board(), &selection, Some(&order))),
            vec!["2", "3", "1"]
        );
    }

    #[test]
    fn stored_order_ignored_under_concrete_category() {
        let selection = Selection {
            category: "Human Resources".into(),
            ..Selection::default()
        };
        let order = OrderRecord::from_ids(["3", "1", "2"]);
        assert_eq!(ids(&derive_displayed(&board(), &selection, Some(&order))), vec!["2"]);
    }
}

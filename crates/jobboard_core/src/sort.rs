//! Sorting and manual-order reapplication.
//!
//! All functions here are pure: they take the fetched jobs by reference and
//! return a new vector. Sorting is stable for every key, so jobs with equal
//! keys keep their relative input order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Job, SortKey};
use crate::prefs::OrderRecord;

/// Return `jobs` ordered by `key`.
pub fn sort_by(jobs: &[Job], key: SortKey) -> Vec<Job> {
    let mut sorted = jobs.to_vec();
    match key {
        SortKey::DateAsc => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::DateDesc => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::NameAsc => sorted.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortKey::NameDesc => sorted.sort_by(|a, b| locale_cmp(&b.name, &a.name)),
        SortKey::CategoryAsc => {
            sorted.sort_by(|a, b| locale_cmp(a.category_or_unknown(), b.category_or_unknown()))
        }
        SortKey::CategoryDesc => {
            sorted.sort_by(|a, b| locale_cmp(b.category_or_unknown(), a.category_or_unknown()))
        }
    }
    sorted
}

/// Reorder `fetched` to follow a stored manual order.
///
/// Ids in `order` that are not among `fetched` are skipped, and fetched jobs
/// missing from `order` are dropped. When nothing survives, the fetched
/// order is returned unchanged.
pub fn apply_order(fetched: &[Job], order: &OrderRecord) -> Vec<Job> {
    let by_id: HashMap<&str, &Job> = fetched.iter().map(|j| (j.id.as_str(), j)).collect();

    let reordered: Vec<Job> = order
        .ids()
        .filter_map(|id| by_id.get(id).map(|job| (*job).clone()))
        .collect();

    if reordered.is_empty() {
        fetched.to_vec()
    } else {
        reordered
    }
}

/// Case-insensitive comparison that breaks case-only ties lowercase first,
/// approximating a default-locale collation.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);

    folded_a.cmp(folded_b).then_with(|| {
        a.chars()
            .zip(b.chars())
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    fn dated() -> Vec<Job> {
        vec![
            Job::new("a", "beta").with_created_at("2021-03-01"),
            Job::new("b", "Alpha").with_created_at("2021-01-01"),
            Job::new("c", "alpha").with_created_at("2021-03-01"),
            Job::new("d", "Gamma").with_created_at("2021-02-01"),
        ]
    }

    #[test]
    fn date_sorts_are_stable() {
        let jobs = dated();
        assert_eq!(ids(&sort_by(&jobs, SortKey::DateAsc)), vec!["b", "d", "a", "c"]);
        assert_eq!(ids(&sort_by(&jobs, SortKey::DateDesc)), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn name_sorts_ignore_case() {
        let jobs = dated();
        assert_eq!(ids(&sort_by(&jobs, SortKey::NameAsc)), vec!["c", "b", "a", "d"]);
        assert_eq!(ids(&sort_by(&jobs, SortKey::NameDesc)), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn equal_names_keep_input_order() {
        let jobs = vec![
            Job::new("1", "Same"),
            Job::new("2", "Same"),
            Job::new("3", "Same"),
        ];
        for key in SortKey::ALL {
            assert_eq!(ids(&sort_by(&jobs, key)), vec!["1", "2", "3"], "{key}");
        }
    }

    #[test]
    fn category_sort_uses_unknown_for_missing() {
        let jobs = vec![
            Job::new("1", "x").with_tag("category", "Software Engineering"),
            Job::new("2", "y"),
            Job::new("3", "z").with_tag("category", "Artificial Intelligence"),
            Job::new("4", "w").with_tag("category", "Zoology"),
        ];
        assert_eq!(ids(&sort_by(&jobs, SortKey::CategoryAsc)), vec!["3", "1", "2", "4"]);
        assert_eq!(ids(&sort_by(&jobs, SortKey::CategoryDesc)), vec!["4", "2", "1", "3"]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let jobs = dated();
        let before = jobs.clone();
        let _ = sort_by(&jobs, SortKey::NameAsc);
        assert_eq!(jobs, before);
    }

    #[test]
    fn apply_order_follows_record() {
        let jobs = dated();
        let order = OrderRecord::from_ids(["d", "zz", "a"]);
        assert_eq!(ids(&apply_order(&jobs, &order)), vec!["d", "a"]);
    }

    #[test]
    fn stale_order_falls_back_to_fetched() {
        let jobs = dated();
        let order = OrderRecord::from_ids(["x", "y"]);
        assert_eq!(apply_order(&jobs, &order), jobs);

        let empty = OrderRecord::default();
        assert_eq!(apply_order(&jobs, &empty), jobs);
    }

    #[test]
    fn locale_cmp_orders_case_variants() {
        assert_eq!(locale_cmp("a", "B"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("abc", "abc"), Ordering::Equal);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
    }
}

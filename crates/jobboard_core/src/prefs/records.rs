//! Typed values stored under the preference keys.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{deserialize_id, Job, Selection, SortKey, ALL_CATEGORIES};

/// Selection snapshot stored under `userFilters`.
///
/// Every field is optional on read; missing or unrecognised values fall
/// back to the selection defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilters {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub selected_category: String,
    #[serde(default, deserialize_with = "lenient_sort_key")]
    pub sort_option: SortKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
}

impl SavedFilters {
    /// Snapshot a selection.
    pub fn from_selection(selection: &Selection) -> Self {
        Self {
            search_term: selection.search_term.clone(),
            selected_category: selection.category.clone(),
            sort_option: selection.sort_key,
            current_page: Some(selection.page),
        }
    }

    /// Rebuild a selection, filling gaps with defaults.
    pub fn into_selection(self) -> Selection {
        let category = if self.selected_category.is_empty() {
            ALL_CATEGORIES.to_string()
        } else {
            self.selected_category
        };
        Selection {
            search_term: self.search_term,
            category,
            sort_key: self.sort_option,
            page: self.current_page.filter(|&p| p >= 1).unwrap_or(1),
        }
    }
}

fn lenient_sort_key<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
}

/// One entry of a manual order. Older stores kept whole job objects here;
/// only `id` is read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// User-chosen display order for one page, stored under
/// `orderedJobs-page{N}` and mirrored to `orderedJobs`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRecord(Vec<OrderEntry>);

impl OrderRecord {
    /// Capture the order of a displayed list.
    pub fn from_jobs(jobs: &[Job]) -> Self {
        Self(
            jobs.iter()
                .map(|j| OrderEntry { id: j.id.clone() })
                .collect(),
        )
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(|id| OrderEntry { id: id.into() }).collect())
    }

    /// Ids in stored order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_filters_missing_fields_default() {
        let filters: SavedFilters = serde_json::from_str("{}").unwrap();
        assert_eq!(filters.into_selection(), Selection::default());
    }

    #[test]
    fn saved_filters_unknown_sort_defaults() {
        let filters: SavedFilters = serde_json::from_str(
            r#"{"searchTerm":"dev","selectedCategory":"Human Resources","sortOption":"bogus"}"#,
        )
        .unwrap();
        let selection = filters.into_selection();
        assert_eq!(selection.search_term, "dev");
        assert_eq!(selection.category, "Human Resources");
        assert_eq!(selection.sort_key, SortKey::DateDesc);
        assert_eq!(selection.page, 1);
    }

    #[test]
    fn saved_filters_page_zero_is_page_one() {
        let filters: SavedFilters = serde_json::from_str(r#"{"currentPage":0}"#).unwrap();
        assert_eq!(filters.into_selection().page, 1);
    }

    #[test]
    fn order_record_reads_legacy_job_objects() {
        let legacy = r#"[
            {"id":"7","name":"Developer","tags":[]},
            {"id":3,"name":"Tester"}
        ]"#;
        let record: OrderRecord = serde_json::from_str(legacy).unwrap();
        assert_eq!(record.ids().collect::<Vec<_>>(), vec!["7", "3"]);
    }

    #[test]
    fn order_record_serializes_ids_only() {
        let jobs = vec![Job::new("b", "Beta"), Job::new("a", "Alpha")];
        let json = serde_json::to_string(&OrderRecord::from_jobs(&jobs)).unwrap();
        assert_eq!(json, r#"[{"id":"b"},{"id":"a"}]"#);
    }
}

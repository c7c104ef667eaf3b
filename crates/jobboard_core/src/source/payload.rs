//! Response envelope of the job search endpoint.
//!
//! ```json
//! { "data": { "jobs": [ ... ] }, "meta": { "maxPage": 5 } }
//! ```

use serde::Deserialize;

use super::{FetchError, JobPage};
use crate::models::Job;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<DataSection>,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct DataSection {
    #[serde(default)]
    jobs: Option<Vec<Job>>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(default, rename = "maxPage")]
    max_page: Option<u32>,
}

/// Decode a response body into a page.
///
/// A body that is not JSON, or has no `data.jobs` array, is `NoData`.
/// A missing `meta.maxPage` yields `total_pages == 0`.
pub fn decode_page(body: &str) -> Result<JobPage, FetchError> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Undecodable job search response: {}", e);
        FetchError::NoData
    })?;

    let jobs = envelope
        .data
        .and_then(|d| d.jobs)
        .ok_or(FetchError::NoData)?;

    let total_pages = envelope.meta.and_then(|m| m.max_page).unwrap_or(0);

    Ok(JobPage { jobs, total_pages })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_jobs_and_max_page() {
        let body = r#"{
            "code": 200,
            "data": { "jobs": [
                { "id": "1", "name": "Software Engineer", "created_at": "2021-01-01T00:00:00Z" }
            ] },
            "meta": { "page": 1, "maxPage": 5, "count": 1 }
        }"#;
        let page = decode_page(body).unwrap();
        assert_eq!(page.jobs.len(), 1);
        assert_eq!(page.total_pages, 5);
    }

    #[test]
    fn missing_meta_is_zero_pages() {
        let page = decode_page(r#"{ "data": { "jobs": [] } }"#).unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn missing_jobs_is_no_data() {
        assert_eq!(decode_page(r#"{ "data": {} }"#), Err(FetchError::NoData));
        assert_eq!(decode_page(r#"{ "meta": { "maxPage": 2 } }"#), Err(FetchError::NoData));
        assert_eq!(decode_page(r#"{ "data": { "jobs": null } }"#), Err(FetchError::NoData));
    }

    #[test]
    fn non_json_is_no_data() {
        assert_eq!(decode_page("<html>oops</html>"), Err(FetchError::NoData));
        assert_eq!(decode_page(r#"{ "data": { "jobs": {} } }"#), Err(FetchError::NoData));
    }
}

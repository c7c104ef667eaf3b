//! HTTP job source for the HrFlow job search API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{decode_page, FetchError, FetchRequest, JobPage, JobSource};
use crate::config::ApiSettings;

/// Fetches pages from `GET {base_url}/jobs/searching`.
#[derive(Debug, Clone)]
pub struct HrflowSource {
    client: reqwest::Client,
    settings: ApiSettings,
}

impl HrflowSource {
    /// Build a source with the credentials in `settings`.
    pub fn new(settings: ApiSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers(&settings))
            .build()?;
        Ok(Self { client, settings })
    }

    /// Endpoint URL without the query string.
    pub fn endpoint(&self) -> String {
        format!("{}/jobs/searching", self.settings.base_url.trim_end_matches('/'))
    }

    /// Query parameters for `request`.
    pub fn query(&self, request: &FetchRequest) -> Vec<(&'static str, String)> {
        vec![
            ("board_keys", format!("[\"{}\"]", self.settings.board_key)),
            ("page", request.page.to_string()),
            ("limit", request.limit.to_string()),
            ("order_by", "desc".to_string()),
        ]
    }

    async fn send(&self, request: &FetchRequest) -> Result<JobPage, FetchError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&self.query(request))
            .timeout(request.timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::network(format!("HTTP {}", status)));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        debug!("Job search response: {} bytes", body.len());
        decode_page(&body)
    }
}

#[async_trait]
impl JobSource for HrflowSource {
    async fn fetch(
        &self,
        request: &FetchRequest,
        cancel: CancellationToken,
    ) -> Result<JobPage, FetchError> {
        info!("Fetching page {} (limit {})", request.page, request.limit);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Fetch of page {} cancelled", request.page);
                Err(FetchError::Cancelled)
            }
            result = self.send(request) => result,
        }
    }
}

fn default_headers(settings: &ApiSettings) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in [
        ("x-api-key", &settings.api_key),
        ("x-user-email", &settings.user_email),
    ] {
        if value.is_empty() {
            continue;
        }
        match HeaderValue::from_str(value) {
            Ok(mut v) => {
                v.set_sensitive(true);
                headers.insert(name, v);
            }
            Err(e) => warn!("Ignoring invalid {} header value: {}", name, e),
        }
    }
    headers
}

fn map_transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings() -> ApiSettings {
        ApiSettings {
            base_url: "https://api.example.test/v1/".to_string(),
            board_key: "board123".to_string(),
            api_key: "secret".to_string(),
            user_email: "me@example.test".to_string(),
        }
    }

    #[test]
    fn builds_endpoint_and_query() {
        let source = HrflowSource::new(settings()).unwrap();
        assert_eq!(source.endpoint(), "https://api.example.test/v1/jobs/searching");

        let request = FetchRequest {
            page: 3,
            limit: 10,
            timeout: Duration::from_secs(5),
        };
        let query = source.query(&request);
        assert_eq!(query[0], ("board_keys", "[\"board123\"]".to_string()));
        assert_eq!(query[1], ("page", "3".to_string()));
        assert_eq!(query[2], ("limit", "10".to_string()));
        assert_eq!(query[3], ("order_by", "desc".to_string()));
    }

    #[test]
    fn headers_skip_empty_credentials() {
        let mut s = settings();
        s.user_email.clear();
        let headers = default_headers(&s);
        assert!(headers.contains_key("x-api-key"));
        assert!(!headers.contains_key("x-user-email"));
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[tokio::test]
    async fn cancelled_before_send() {
        let source = HrflowSource::new(settings()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let request = FetchRequest {
            page: 1,
            limit: 10,
            timeout: Duration::from_secs(5),
        };
        let result = source.fetch(&request, cancel).await;
        assert_eq!(result, Err(FetchError::Cancelled));
    }
}

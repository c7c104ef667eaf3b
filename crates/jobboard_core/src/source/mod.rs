//! Remote job source contract.
//!
//! This module provides:
//! - `JobSource`: fetch one page of jobs, honouring a cancellation token
//! - `FetchError`: the failure kinds shown to the user
//! - `fetch_with_deadline`: timeout and cancellation guard around any source
//! - `HrflowSource`: HTTP implementation for the HrFlow job search API

mod http;
mod payload;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::models::Job;

pub use http::HrflowSource;
pub use payload::decode_page;

/// Errors a fetch can end with.
///
/// The `Display` text of every variant except `Cancelled` is the message
/// shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Superseded by a newer request. Never shown.
    #[error("Request was cancelled")]
    Cancelled,

    /// The request exceeded its deadline.
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// Transport failure or non-success HTTP status.
    #[error("Failed to fetch jobs. Please try again later.")]
    Network { detail: String },

    /// The response did not contain a jobs collection.
    #[error("Failed to fetch jobs. No data returned.")]
    NoData,
}

impl FetchError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Diagnostic detail for logs, if the kind carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Network { detail } => Some(detail),
            _ => None,
        }
    }
}

/// Parameters of a single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Deadline for the whole request.
    pub timeout: Duration,
}

/// One page of jobs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    /// Number of pages upstream; 0 when the API did not say.
    pub total_pages: u32,
}

/// Something that can fetch pages of jobs.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch one page. Implementations should return
    /// `FetchError::Cancelled` promptly once `cancel` fires.
    async fn fetch(
        &self,
        request: &FetchRequest,
        cancel: CancellationToken,
    ) -> Result<JobPage, FetchError>;
}

#[async_trait]
impl<T: JobSource + ?Sized> JobSource for std::sync::Arc<T> {
    async fn fetch(
        &self,
        request: &FetchRequest,
        cancel: CancellationToken,
    ) -> Result<JobPage, FetchError> {
        (**self).fetch(request, cancel).await
    }
}

/// Run `source.fetch`, abandoning it when `cancel` fires or the request
/// timeout elapses.
pub async fn fetch_with_deadline<S>(
    source: &S,
    request: &FetchRequest,
    cancel: CancellationToken,
) -> Result<JobPage, FetchError>
where
    S: JobSource + ?Sized,
{
    let fetch = source.fetch(request, cancel.clone());

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FetchError::Cancelled),
        outcome = tokio::time::timeout(request.timeout, fetch) => {
            outcome.unwrap_or(Err(FetchError::Timeout))
        }
    }
}

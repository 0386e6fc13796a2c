//! Analysis backends.
//!
//! The controller talks to a backend through [`AnalysisBackend`]. `http`
//! posts to the real `/check-news` service; `mock` simulates it locally.

pub mod http;
pub mod mock;

use crate::models::{AnalysisRequest, AnalysisResponse, SubmissionKind};
use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use http::HttpBackend;
pub use mock::MockBackend;

/// Why a backend call did not produce an [`AnalysisResponse`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The cancellation token fired before the call finished.
    #[error("request cancelled")]
    Cancelled,

    /// Non-2xx status; `message` is the server's `error` field if readable.
    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Parse(String),
}

#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Analyze one submission.
    ///
    /// Implementations must return [`BackendError::Cancelled`] promptly once
    /// `cancel` fires.
    async fn check(
        &self,
        request: &AnalysisRequest,
        kind: SubmissionKind,
        cancel: CancellationToken,
    ) -> Result<AnalysisResponse, BackendError>;

    /// Human-readable description of where analyses come from.
    fn describe(&self) -> String;
}

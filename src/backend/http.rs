//! HTTP backend for the `/check-news` service.

use crate::backend::{AnalysisBackend, BackendError};
use crate::models::{AnalysisRequest, AnalysisResponse, ErrorBody, SubmissionKind};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Path of the analysis endpoint, relative to the service root.
pub const CHECK_NEWS_PATH: &str = "/check-news";

/// Posts submissions to a fact-check service.
pub struct HttpBackend {
    http_client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    /// Create a backend for the service rooted at `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self> {
        let url = check_news_url(endpoint);
        info!("Using fact-check service at {}", url);

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("newscheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http_client, url })
    }
}

/// Join the service root and the analysis path.
pub fn check_news_url(endpoint: &str) -> String {
    let root = endpoint.trim().trim_end_matches('/');
    if root.ends_with(CHECK_NEWS_PATH) {
        root.to_string()
    } else {
        format!("{}{}", root, CHECK_NEWS_PATH)
    }
}

fn describe_transport_error(e: &reqwest::Error, url: &str) -> String {
    if e.is_connect() {
        format!("cannot connect to {}. Is the service running?", url)
    } else if e.is_timeout() {
        format!("connection to {} timed out", url)
    } else {
        format!("request failed: {}", e)
    }
}

/// Best-effort extraction of the `error` field from a failure body.
fn parse_error_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn check(
        &self,
        request: &AnalysisRequest,
        _kind: SubmissionKind,
        cancel: CancellationToken,
    ) -> Result<AnalysisResponse, BackendError> {
        debug!("POST {} ({} bytes of content)", self.url, request.content.len());

        let send = self.http_client.post(&self.url).json(request).send();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(BackendError::Cancelled),
            result = send => result
                .map_err(|e| BackendError::Transport(describe_transport_error(&e, &self.url)))?,
        };

        let status = response.status();
        debug!("Fact-check service answered {}", status);

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(BackendError::Cancelled),
            result = response.bytes() => result
                .map_err(|e| BackendError::Transport(format!("failed to read response: {}", e)))?,
        };

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: parse_error_body(&body),
            });
        }

        serde_json::from_slice::<AnalysisResponse>(&body)
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

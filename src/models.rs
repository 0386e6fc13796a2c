//! Data models for the fact-check client.
//!
//! This module contains the wire types exchanged with the `/check-news`
//! backend and the request lifecycle state owned by the controller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict shown when the backend omits one or sends a blank string.
pub const DEFAULT_VERDICT: &str = "INCONCLUSIVE";

/// Body of a `POST /check-news` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The submitted news text (or URL), already trimmed.
    pub content: String,
}

/// Per-category claim counters.
///
/// Signed: the backend derives `unverifiable` by subtraction, and a verdict
/// matching several categories drives it below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCounts {
    #[serde(default)]
    pub accurate: i64,
    #[serde(default)]
    pub misleading: i64,
    #[serde(default)]
    pub r#false: i64,
    #[serde(default)]
    pub unverifiable: i64,
}

impl ClaimCounts {
    /// Sum of the four counters, saturating at the `i64` bounds.
    pub fn total(&self) -> i64 {
        self.accurate
            .saturating_add(self.misleading)
            .saturating_add(self.r#false)
            .saturating_add(self.unverifiable)
    }
}

/// One atomic factual assertion extracted from the article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetail {
    #[serde(default)]
    pub claim: String,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub explanation: String,
    /// Supporting source links. The backend omits this for some claims.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

/// Successful response from the fact-checking backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub overall_verdict: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub counts: ClaimCounts,
    #[serde(default)]
    pub details: Vec<ClaimDetail>,
    /// Confidence percentage, only produced by the simulated backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl AnalysisResponse {
    /// The overall verdict as displayed, falling back to [`DEFAULT_VERDICT`].
    pub fn display_verdict(&self) -> &str {
        match self.overall_verdict.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => DEFAULT_VERDICT,
        }
    }
}

/// Failure body returned with a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Which input a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    /// Pasted news text.
    Text,
    /// A link to a news article.
    Link,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionKind::Text => write!(f, "text"),
            SubmissionKind::Link => write!(f, "link"),
        }
    }
}

/// Lifecycle of a single click-to-result cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
    TimedOut,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestState::Idle => write!(f, "idle"),
            RequestState::InFlight => write!(f, "in flight"),
            RequestState::Succeeded => write!(f, "succeeded"),
            RequestState::Failed => write!(f, "failed"),
            RequestState::TimedOut => write!(f, "timed out"),
        }
    }
}

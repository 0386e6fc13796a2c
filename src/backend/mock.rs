//! Simulated backend.
//!
//! Produces a structurally valid [`AnalysisResponse`] after an artificial
//! delay, with randomized claim verdicts and confidence. Useful for demos and
//! for working on presentation without a running service.

use crate::analysis::{overall_verdict, tally};
use crate::backend::{AnalysisBackend, BackendError};
use crate::config::MockConfig;
use crate::models::{AnalysisRequest, AnalysisResponse, ClaimDetail, SubmissionKind};
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

const TEXT_CLAIMS: &[&str] = &[
    "Claim about the state of the economy",
    "Date of the reported event",
    "Statement about the new policy",
    "Information about the president's health",
    "Resignation schedule",
];

const LINK_CLAIMS: &[&str] = &[
    "Location of the incident",
    "Name of the institution involved",
    "Motive of the perpetrator",
    "Number of victims",
    "Actual date of the incident",
];

const VERDICTS: &[(&str, &str)] = &[
    ("True", "Multiple independent sources confirm this claim."),
    ("Accurate", "The claim matches published records."),
    ("Misleading", "The claim is based on facts but omits important context."),
    ("False", "Available sources contradict this claim."),
    ("Unverifiable", "No relevant sources were found to verify this claim."),
];

/// Uniform pick in `0..n`.
fn pick(n: usize) -> usize {
    (Uuid::new_v4().as_u128() % n.max(1) as u128) as usize
}

/// Uniform pick in `low..=high`.
fn pick_between(low: u8, high: u8) -> u8 {
    low + pick((high - low) as usize + 1) as u8
}

/// Local stand-in for the fact-check service.
#[derive(Debug, Clone)]
pub struct MockBackend {
    text_delay: Duration,
    link_delay: Duration,
}

impl MockBackend {
    pub fn new(text_delay: Duration, link_delay: Duration) -> Self {
        Self {
            text_delay,
            link_delay,
        }
    }

    pub fn from_config(config: &MockConfig) -> Self {
        Self::new(
            Duration::from_millis(config.text_delay_ms),
            Duration::from_millis(config.link_delay_ms),
        )
    }

    fn delay_for(&self, kind: SubmissionKind) -> Duration {
        match kind {
            SubmissionKind::Text => self.text_delay,
            SubmissionKind::Link => self.link_delay,
        }
    }
}

/// Build a randomized response for a submission.
pub fn simulate(request: &AnalysisRequest, kind: SubmissionKind) -> AnalysisResponse {
    let (pool, confidence, summary) = match kind {
        SubmissionKind::Text => (
            TEXT_CLAIMS,
            pick_between(70, 99),
            format!(
                "Simulated analysis of {} characters of news text.",
                request.content.chars().count()
            ),
        ),
        SubmissionKind::Link => (
            LINK_CLAIMS,
            pick_between(60, 99),
            format!("Simulated analysis of the article at {}.", request.content),
        ),
    };

    let details: Vec<ClaimDetail> = pool
        .iter()
        .map(|claim| {
            let (verdict, explanation) = VERDICTS[pick(VERDICTS.len())];
            let sources = (0..pick(4))
                .map(|i| format!("https://sources.example/{}/{}", kind, i + 1))
                .collect();
            ClaimDetail {
                claim: claim.to_string(),
                verdict: verdict.to_string(),
                explanation: explanation.to_string(),
                sources: Some(sources),
            }
        })
        .collect();

    let counts = tally(&details);

    AnalysisResponse {
        overall_verdict: Some(overall_verdict(&counts, details.len())),
        summary,
        counts,
        details,
        confidence: Some(confidence),
    }
}

#[async_trait]
impl AnalysisBackend for MockBackend {
    async fn check(
        &self,
        request: &AnalysisRequest,
        kind: SubmissionKind,
        cancel: CancellationToken,
    ) -> Result<AnalysisResponse, BackendError> {
        let delay = self.delay_for(kind);
        debug!("Simulating {} analysis ({}ms)", kind, delay.as_millis());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(BackendError::Cancelled),
            _ = tokio::time::sleep(delay) => {}
        }

        Ok(simulate(request, kind))
    }

    fn describe(&self) -> String {
        "simulated".to_string()
    }
}

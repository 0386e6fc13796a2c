//! View model for a finished analysis.
//!
//! [`build_view`] is a pure mapping from the backend payload to everything a
//! renderer needs, so presentation rules are testable without a terminal.

use crate::analysis::{classify, VerdictColor};
use crate::models::{AnalysisResponse, ClaimCounts, ClaimDetail, DEFAULT_VERDICT};
use serde::Serialize;

/// Text shown instead of an empty claim list.
pub const NO_DETAILS_PLACEHOLDER: &str = "No claim details were found.";

/// A colored verdict label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictBadge {
    pub text: String,
    pub color: VerdictColor,
}

impl VerdictBadge {
    pub fn new(verdict: &str) -> Self {
        let text = match verdict.trim() {
            "" => DEFAULT_VERDICT.to_string(),
            v => v.to_string(),
        };
        let color = classify(&text);
        Self { text, color }
    }
}

/// One labelled counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counter {
    pub label: &'static str,
    pub value: i64,
    pub color: VerdictColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimView {
    pub claim: String,
    pub badge: VerdictBadge,
    pub explanation: String,
    /// `None` when the claim has no sources; never `Some(vec![])`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

/// Claim breakdown: either a list or an explicit placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailsView {
    Claims { claims: Vec<ClaimView> },
    Placeholder { text: &'static str },
}

/// Everything needed to display one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub verdict: VerdictBadge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    pub summary: String,
    pub counters: [Counter; 4],
    pub total_claims: i64,
    pub details: DetailsView,
}

/// Build the view model for a successful response.
pub fn build_view(response: &AnalysisResponse) -> ResultView {
    let details = if response.details.is_empty() {
        DetailsView::Placeholder {
            text: NO_DETAILS_PLACEHOLDER,
        }
    } else {
        DetailsView::Claims {
            claims: response.details.iter().map(claim_view).collect(),
        }
    };

    ResultView {
        verdict: VerdictBadge::new(response.display_verdict()),
        confidence: response.confidence.map(|c| c.min(100)),
        summary: response.summary.trim().to_string(),
        counters: counters(&response.counts),
        total_claims: response.counts.total(),
        details,
    }
}

fn claim_view(detail: &ClaimDetail) -> ClaimView {
    let sources = detail
        .sources
        .as_ref()
        .map(|s| {
            s.iter()
                .map(|link| link.trim())
                .filter(|link| !link.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .filter(|s| !s.is_empty());

    ClaimView {
        claim: detail.claim.clone(),
        badge: VerdictBadge::new(&detail.verdict),
        explanation: detail.explanation.clone(),
        sources,
    }
}

fn counters(counts: &ClaimCounts) -> [Counter; 4] {
    [
        Counter {
            label: "Accurate",
            value: counts.accurate,
            color: VerdictColor::Green,
        },
        Counter {
            label: "Misleading",
            value: counts.misleading,
            color: VerdictColor::Yellow,
        },
        Counter {
            label: "False",
            value: counts.r#false,
            color: VerdictColor::Red,
        },
        Counter {
            label: "Unverifiable",
            value: counts.unverifiable,
            color: VerdictColor::Gray,
        },
    ]
}

//! Claim tallying and overall verdict derivation.
//!
//! These are the rules the fact-check backend applies when it builds the
//! `counts` and `overall_verdict` fields. The simulated backend uses them so
//! its responses are internally consistent.

use crate::models::{ClaimCounts, ClaimDetail, DEFAULT_VERDICT};

const ACCURATE_KEYWORDS: &[&str] = &["TRUE", "ACCURATE"];
const MISLEADING_KEYWORDS: &[&str] = &["MISLEADING", "PARTIALLY TRUE"];
const FALSE_KEYWORDS: &[&str] = &["FALSE", "INACCURATE"];

/// Share of claims above which a mixed article leans one way.
const MAJORITY_RATIO: f64 = 0.7;

fn contains_any(verdict: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| verdict.contains(kw))
}

/// Count claims by verdict.
///
/// A verdict may match several keyword lists ("PARTIALLY TRUE" is both
/// accurate and misleading). Each match is counted and `unverifiable` is
/// whatever is left over, which goes negative when matches overlap.
pub fn tally(details: &[ClaimDetail]) -> ClaimCounts {
    let mut counts = ClaimCounts::default();

    for detail in details {
        let verdict = detail.verdict.to_uppercase();
        if contains_any(&verdict, ACCURATE_KEYWORDS) {
            counts.accurate += 1;
        }
        if contains_any(&verdict, MISLEADING_KEYWORDS) {
            counts.misleading += 1;
        }
        if contains_any(&verdict, FALSE_KEYWORDS) {
            counts.r#false += 1;
        }
    }

    let matched = counts.accurate + counts.misleading + counts.r#false;
    counts.unverifiable = details.len() as i64 - matched;
    counts
}

/// Derive the article-level verdict from claim counts.
pub fn overall_verdict(counts: &ClaimCounts, total_claims: usize) -> String {
    if total_claims == 0 {
        return DEFAULT_VERDICT.to_string();
    }

    let total = total_claims as f64;
    let verdict = if counts.r#false > 0 {
        if counts.accurate as f64 / total >= MAJORITY_RATIO {
            "MOSTLY ACCURATE"
        } else if counts.r#false as f64 / total >= MAJORITY_RATIO {
            "MOSTLY FALSE"
        } else {
            "MIXED"
        }
    } else if counts.misleading > 0 {
        "MISLEADING"
    } else if counts.accurate > 0 {
        "ACCURATE"
    } else {
        DEFAULT_VERDICT
    };

    verdict.to_string()
}

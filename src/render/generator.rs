//! Markdown and JSON report generation.
//!
//! This module turns a [`ResultView`] plus run metadata into a saved report.

use crate::render::view::{ClaimView, Counter, DetailsView, ResultView};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata about one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// What was submitted (text preview or URL).
    pub submitted: String,
    /// Where the analysis came from (endpoint URL or "simulated").
    pub analyzed_by: String,
    pub analysis_date: DateTime<Utc>,
    pub duration_seconds: f64,
}

/// A complete fact-check report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub result: ResultView,
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Fact-Check Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_verdict_section(&report.result));
    output.push_str(&generate_summary_section(&report.result.summary));
    output.push_str(&generate_counts_section(
        &report.result.counters,
        report.result.total_claims,
    ));
    output.push_str(&generate_details_section(&report.result.details));
    output.push_str(&generate_footer());

    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Submitted:** {}\n", metadata.submitted));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Analyzed By:** `{}`\n", metadata.analyzed_by));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

fn generate_verdict_section(result: &ResultView) -> String {
    let mut section = String::new();

    section.push_str("## Verdict\n\n");
    section.push_str(&format!(
        "{} **{}**\n\n",
        result.verdict.color.emoji(),
        result.verdict.text
    ));
    if let Some(confidence) = result.confidence {
        section.push_str(&format!("Confidence: **{}%**\n\n", confidence));
    }

    section
}

fn generate_summary_section(summary: &str) -> String {
    if summary.is_empty() {
        return String::new();
    }

    format!("## Summary\n\n{}\n\n", summary)
}

fn generate_counts_section(counters: &[Counter], total: i64) -> String {
    let mut section = String::new();

    section.push_str("## Claim Breakdown\n\n");
    section.push_str(&format!("Claims checked: **{}**\n\n", total));

    let header: Vec<String> = counters
        .iter()
        .map(|c| format!("{} {}", c.color.emoji(), c.label))
        .collect();
    section.push_str(&format!("| {} |\n", header.join(" | ")));
    section.push_str(&format!("|{}\n", ":---:|".repeat(counters.len())));

    let values: Vec<String> = counters.iter().map(|c| c.value.to_string()).collect();
    section.push_str(&format!("| {} |\n\n", values.join(" | ")));

    section
}

fn generate_details_section(details: &DetailsView) -> String {
    let mut section = String::new();

    section.push_str("## Claim Details\n\n");

    match details {
        DetailsView::Placeholder { text } => {
            section.push_str(&format!("*{}*\n\n", text));
        }
        DetailsView::Claims { claims } => {
            for (i, claim) in claims.iter().enumerate() {
                section.push_str(&generate_claim_block(i + 1, claim));
            }
        }
    }

    section
}

/// Generate a single claim block.
fn generate_claim_block(index: usize, claim: &ClaimView) -> String {
    let mut block = String::new();

    block.push_str(&format!("### {}. {}\n\n", index, claim.claim));
    block.push_str(&format!(
        "{} **{}**\n\n",
        claim.badge.color.emoji(),
        claim.badge.text
    ));

    if !claim.explanation.is_empty() {
        block.push_str(&format!("{}\n\n", claim.explanation));
    }

    if let Some(ref sources) = claim.sources {
        block.push_str("**Sources:**\n\n");
        for source in sources {
            block.push_str(&format!("- <{}>\n", source));
        }
        block.push('\n');
    }

    block.push_str("---\n\n");

    block
}

fn generate_footer() -> String {
    "*Report generated by newscheck*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResponse, ClaimDetail};
    use crate::render::build_view;

    fn create_test_report(details: Vec<ClaimDetail>) -> Report {
        let response = AnalysisResponse {
            overall_verdict: Some("MIXED".to_string()),
            summary: "The article mixes facts and errors.".to_string(),
            details,
            confidence: Some(82),
            ..Default::default()
        };

        Report {
            metadata: ReportMetadata {
                submitted: "Breaking: the bridge opened in 1932".to_string(),
                analyzed_by: "http://localhost:5000/check-news".to_string(),
                analysis_date: Utc::now(),
                duration_seconds: 3.2,
            },
            result: build_view(&response),
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report(vec![ClaimDetail {
            claim: "The bridge opened in 1932".to_string(),
            verdict: "True".to_string(),
            explanation: "City records confirm it.".to_string(),
            sources: Some(vec!["https://records.example/bridge".to_string()]),
        }]);
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Fact-Check Report"));
        assert!(markdown.contains("## Verdict"));
        assert!(markdown.contains("🟡 **MIXED**"));
        assert!(markdown.contains("Confidence: **82%**"));
        assert!(markdown.contains("### 1. The bridge opened in 1932"));
        assert!(markdown.contains("<https://records.example/bridge>"));
    }

    #[test]
    fn test_claim_without_sources_has_no_sources_block() {
        let report = create_test_report(vec![ClaimDetail {
            claim: "Nobody attended".to_string(),
            verdict: "False".to_string(),
            explanation: String::new(),
            sources: Some(vec![]),
        }]);
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("🔴 **False**"));
        assert!(!markdown.contains("**Sources:**"));
    }

    #[test]
    fn test_empty_details_placeholder() {
        let report = create_test_report(vec![]);
        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("*No claim details were found.*"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(vec![]);
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"submitted\""));
        assert!(json.contains("\"verdict\""));
        assert!(json.contains("\"placeholder\""));
    }
}

//! Plain terminal rendering of a [`ResultView`].

use crate::analysis::VerdictColor;
use crate::render::view::{DetailsView, ResultView, VerdictBadge};

/// Format a badge, optionally wrapped in ANSI color codes.
pub fn badge(badge: &VerdictBadge, color: bool) -> String {
    paint(
        &format!("{} {}", badge.color.emoji(), badge.text),
        badge.color,
        color,
    )
}

fn paint(text: &str, color: VerdictColor, enabled: bool) -> String {
    if enabled {
        format!("\x1b[1;{}m{}\x1b[0m", color.ansi_code(), text)
    } else {
        text.to_string()
    }
}

/// Render the full result block for the terminal.
pub fn render_result(view: &ResultView, color: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n📰 Verdict: {}\n", badge(&view.verdict, color)));
    if let Some(confidence) = view.confidence {
        out.push_str(&format!("   Confidence: {}%\n", confidence));
    }

    if !view.summary.is_empty() {
        out.push_str(&format!("\n📝 Summary:\n   {}\n", view.summary));
    }

    let counters: Vec<String> = view
        .counters
        .iter()
        .map(|c| format!("{} {}: {}", c.color.emoji(), c.label, c.value))
        .collect();
    out.push_str(&format!(
        "\n📊 Claims ({} total):\n   {}\n",
        view.total_claims,
        counters.join(" | ")
    ));

    out.push_str("\n🔎 Details:\n");
    match &view.details {
        DetailsView::Placeholder { text } => {
            out.push_str(&format!("   {}\n", text));
        }
        DetailsView::Claims { claims } => {
            for (i, claim) in claims.iter().enumerate() {
                out.push_str(&format!("\n   {}. {}\n", i + 1, claim.claim));
                out.push_str(&format!("      {}\n", badge(&claim.badge, color)));
                if !claim.explanation.is_empty() {
                    out.push_str(&format!("      {}\n", claim.explanation));
                }
                if let Some(ref sources) = claim.sources {
                    out.push_str("      Sources:\n");
                    for source in sources {
                        out.push_str(&format!("        - {}\n", source));
                    }
                }
            }
        }
    }

    out
}

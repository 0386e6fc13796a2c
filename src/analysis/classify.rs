//! Verdict color classification.
//!
//! The backend's verdict vocabulary is free text ("FALSE", "Mostly Accurate",
//! "Partially True", ...), so classification is a case-insensitive substring
//! match over an ordered rule list. Values no rule matches fall through to
//! [`VerdictColor::Gray`]; they are never treated as errors.

use serde::Serialize;
use std::fmt;

/// Display color of a verdict badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictColor {
    Red,
    Green,
    Yellow,
    Gray,
}

impl fmt::Display for VerdictColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictColor::Red => write!(f, "red"),
            VerdictColor::Green => write!(f, "green"),
            VerdictColor::Yellow => write!(f, "yellow"),
            VerdictColor::Gray => write!(f, "gray"),
        }
    }
}

impl VerdictColor {
    /// Returns an emoji representation of the color.
    pub fn emoji(&self) -> &'static str {
        match self {
            VerdictColor::Red => "🔴",
            VerdictColor::Green => "🟢",
            VerdictColor::Yellow => "🟡",
            VerdictColor::Gray => "⚪",
        }
    }

    /// ANSI SGR foreground code for terminal badges.
    pub fn ansi_code(&self) -> &'static str {
        match self {
            VerdictColor::Red => "31",
            VerdictColor::Green => "32",
            VerdictColor::Yellow => "33",
            VerdictColor::Gray => "90",
        }
    }
}

/// Ordered rules; the first rule with a matching keyword wins.
/// A verdict naming both "FALSE" and "TRUE" is red.
const RULES: &[(&[&str], VerdictColor)] = &[
    (&["FALSE"], VerdictColor::Red),
    (&["ACCURATE", "TRUE"], VerdictColor::Green),
    (&["MISLEADING", "MIXED"], VerdictColor::Yellow),
];

/// Map a verdict string to its badge color.
pub fn classify(verdict: &str) -> VerdictColor {
    let upper = verdict.to_uppercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| upper.contains(kw)))
        .map(|(_, color)| *color)
        .unwrap_or(VerdictColor::Gray)
}

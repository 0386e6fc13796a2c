//! Verdict analysis.
//!
//! Classification of backend verdict strings into display colors, and the
//! claim tally rules used to derive an overall verdict.

pub mod aggregator;
pub mod classify;

pub use aggregator::{overall_verdict, tally};
pub use classify::{classify, VerdictColor};

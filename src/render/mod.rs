//! Result rendering.
//!
//! `view` builds the presentation model; `terminal` and `generator` turn it
//! into console output and saved reports.

pub mod generator;
pub mod terminal;
pub mod view;

pub use generator::{generate_json_report, generate_markdown_report, Report, ReportMetadata};
pub use view::{build_view, ResultView};

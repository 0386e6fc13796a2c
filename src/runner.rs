//! Submission runner.
//!
//! Wraps an [`AnalysisController`] with what happens around a cycle: saving
//! the session, writing the report and applying `--fail-on-false`. Also
//! drives the line-by-line interactive session.

use crate::analysis::VerdictColor;
use crate::backend::AnalysisBackend;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::controller::{AnalysisController, Completed, Submission};
use crate::render::terminal::render_result;
use crate::render::{generate_json_report, generate_markdown_report, Report, ReportMetadata};
use crate::session::SessionRecord;
use crate::surface::{NoticeLevel, Surface};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// Typed by the user to leave an interactive session.
pub const QUIT_COMMAND: &str = ":q";

/// Exit code for a false overall verdict under `--fail-on-false`.
pub const EXIT_FALSE_VERDICT: i32 = 2;

/// Runs submissions through one controller.
pub struct Runner<'a, B, S> {
    controller: AnalysisController<B, S>,
    config: &'a Config,
    fail_on_false: bool,
}

impl<'a, B: AnalysisBackend, S: Surface> Runner<'a, B, S> {
    pub fn new(controller: AnalysisController<B, S>, config: &'a Config, fail_on_false: bool) -> Self {
        Self {
            controller,
            config,
            fail_on_false,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &AnalysisController<B, S> {
        &self.controller
    }

    /// Run one cycle and handle its result. Returns the exit code.
    ///
    /// Cycle errors have been shown by the controller and yield `Ok(1)`.
    /// `Err` means the result could not be written out.
    pub async fn run_once(&mut self, submission: Submission) -> Result<i32> {
        match self.controller.submit(submission.clone()).await {
            Ok(Some(completed)) => self.finish(&submission, completed),
            Ok(None) => Ok(0),
            Err(e) => {
                debug!(
                    "Cycle ended {} ({:?}): {}",
                    self.controller.state(),
                    e.kind(),
                    e
                );
                Ok(1)
            }
        }
    }

    /// Read submissions line by line until EOF or [`QUIT_COMMAND`].
    ///
    /// Nothing that goes wrong with a single line ends the session. Returns
    /// [`EXIT_FALSE_VERDICT`] if any result tripped `--fail-on-false`.
    pub async fn run_lines<R>(&mut self, reader: R, prompt: bool) -> Result<i32>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut exit_code = 0;

        loop {
            if prompt {
                eprint!("\nnews> ");
            }

            let line = match lines.next_line().await.context("Failed to read from stdin")? {
                Some(line) => line,
                None => break,
            };

            let line = line.trim();
            if line == QUIT_COMMAND {
                break;
            }
            if line.is_empty() {
                continue;
            }

            match self.run_once(Submission::from_line(line)).await {
                Ok(EXIT_FALSE_VERDICT) => exit_code = EXIT_FALSE_VERDICT,
                Ok(_) => {}
                Err(e) => self
                    .controller
                    .surface_mut()
                    .notify(NoticeLevel::Error, &format!("{:#}", e)),
            }
        }

        Ok(exit_code)
    }

    /// Save the session, emit the report and apply `--fail-on-false`.
    fn finish(&mut self, submission: &Submission, completed: Completed) -> Result<i32> {
        let metadata = ReportMetadata {
            submitted: submission.preview(),
            analyzed_by: self.controller.backend().describe(),
            analysis_date: Utc::now(),
            duration_seconds: completed.elapsed.as_secs_f64(),
        };

        if self.config.session.enabled {
            let record = SessionRecord {
                kind: submission.kind,
                submitted: metadata.submitted.clone(),
                analyzed_by: metadata.analyzed_by.clone(),
                saved_at: metadata.analysis_date,
                duration_seconds: metadata.duration_seconds,
                response: completed.response,
            };

            if let Err(e) = self.config.session.store().save(&record) {
                warn!("Could not save session: {:#}", e);
            }
        }

        let is_false = completed.view.verdict.color == VerdictColor::Red;
        let report = Report {
            metadata,
            result: completed.view,
        };

        if let Some(path) = emit_report(&report, self.config, true)? {
            self.controller
                .surface_mut()
                .notify(NoticeLevel::Success, &format!("Report saved to: {}", path.display()));
        }

        if self.fail_on_false && is_false {
            eprintln!(
                "\n⛔ Overall verdict is {}. Failing (exit code {}).",
                report.result.verdict.text, EXIT_FALSE_VERDICT
            );
            return Ok(EXIT_FALSE_VERDICT);
        }

        Ok(0)
    }
}

/// Write the report in the configured format.
///
/// Returns the file path when the report went to a file. `already_shown`
/// means the surface has printed the terminal rendering itself.
pub fn emit_report(report: &Report, config: &Config, already_shown: bool) -> Result<Option<PathBuf>> {
    let content = match config.general.format {
        OutputFormat::Terminal => {
            if config.general.output.is_none() {
                if !already_shown {
                    print!("{}", render_result(&report.result, config.general.color));
                }
                return Ok(None);
            }
            render_result(&report.result, false)
        }
        OutputFormat::Markdown => generate_markdown_report(report),
        OutputFormat::Json => generate_json_report(report)?,
    };

    match config.general.output {
        Some(ref output) => {
            let path = PathBuf::from(output);
            std::fs::write(&path, &content)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            Ok(Some(path))
        }
        None => {
            println!("{}", content);
            Ok(None)
        }
    }
}

//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// newscheck - fact-check news text or articles from the terminal
///
/// Submits a piece of news text or an article URL to a fact-check service
/// and shows the overall verdict, claim counts and per-claim details.
///
/// Examples:
///   newscheck --text "The city council voted to ban cars downtown."
///   newscheck --url https://news.example/story --format markdown -o report.md
///   newscheck --file article.txt --mock
///   newscheck --interactive
///   newscheck --show-last
///   newscheck --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// News text to analyze
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Article URL to analyze
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Read news text from a file ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Read submissions line by line from stdin
    ///
    /// Lines starting with http:// or https:// are sent as links, everything
    /// else as text. Enter ":q" or close stdin to stop.
    #[arg(short, long)]
    pub interactive: bool,

    /// Show the last successful analysis again
    #[arg(long)]
    pub show_last: bool,

    /// Use the simulated backend instead of the fact-check service
    #[arg(long)]
    pub mock: bool,

    /// Fact-check service root URL
    ///
    /// The request goes to <ENDPOINT>/check-news. Default: from config or
    /// http://localhost:5000.
    #[arg(long, value_name = "URL", env = "NEWSCHECK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    ///
    /// How long to wait for the service before giving up. Default: from
    /// config or 60s.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format (terminal, markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .newscheck.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with code 2 when the overall verdict is false
    ///
    /// Useful for scripts and CI pipelines.
    #[arg(long)]
    pub fail_on_false: bool,

    /// Disable colored verdict badges
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .newscheck.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored console rendering (default)
    #[default]
    Terminal,
    /// Markdown report
    Markdown,
    /// JSON report
    Json,
}

/// Where the content to analyze comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    Url(String),
    File(PathBuf),
    Interactive,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        let sources = self.source_count();
        if self.show_last {
            if sources > 0 {
                return Err("--show-last cannot be combined with an input".to_string());
            }
        } else if sources == 0 {
            return Err(
                "Provide one of --text, --url, --file or --interactive (or use --show-last)"
                    .to_string(),
            );
        } else if sources > 1 {
            return Err(
                "Only one of --text, --url, --file or --interactive may be given".to_string(),
            );
        }

        if let Some(ref endpoint) = self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err("Endpoint must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(ref file) = self.file {
            if file.as_os_str() != "-" && !file.is_file() {
                return Err(format!("Input file does not exist: {}", file.display()));
            }
        }

        Ok(())
    }

    fn source_count(&self) -> usize {
        [
            self.text.is_some(),
            self.url.is_some(),
            self.file.is_some(),
            self.interactive,
        ]
        .iter()
        .filter(|given| **given)
        .count()
    }

    /// The input to analyze. `None` for `--show-last` and `--init-config`.
    pub fn input_source(&self) -> Option<InputSource> {
        if let Some(ref text) = self.text {
            Some(InputSource::Text(text.clone()))
        } else if let Some(ref url) = self.url {
            Some(InputSource::Url(url.clone()))
        } else if let Some(ref file) = self.file {
            Some(InputSource::File(file.clone()))
        } else if self.interactive {
            Some(InputSource::Interactive)
        } else {
            None
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

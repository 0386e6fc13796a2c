//! newscheck - fact-check news text and articles from the terminal
//!
//! A CLI tool that submits news text or an article URL to a fact-check
//! service and renders the verdict, claim counts and per-claim details.
//!
//! Exit codes:
//!   0 - Success (or no --fail-on-false set)
//!   1 - Runtime error (validation, timeout, server, config, etc.)
//!   2 - Overall verdict is false and --fail-on-false is set

mod analysis;
mod backend;
mod cli;
mod config;
mod controller;
mod error;
mod models;
mod render;
mod runner;
mod session;
mod surface;

use anyhow::{Context, Result};
use backend::{AnalysisBackend, HttpBackend, MockBackend};
use cli::{Args, InputSource, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use controller::{AnalysisController, ControllerConfig, Submission};
use render::{build_view, Report, ReportMetadata};
use runner::{emit_report, Runner, QUIT_COMMAND};
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use surface::TerminalSurface;
use tokio::io::BufReader;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("newscheck v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .newscheck.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to set the service endpoint, timeout, output format and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so JSON and Markdown output on stdout stays clean.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch on the selected mode. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    if args.show_last {
        return handle_show_last(&config);
    }

    let source = args
        .input_source()
        .context("No input given. Use --text, --url, --file or --interactive")?;

    if config.backend.mock {
        let backend = MockBackend::from_config(&config.mock);
        run_with(backend, source, &args, &config).await
    } else {
        let backend = HttpBackend::new(&config.backend.endpoint)?;
        run_with(backend, source, &args, &config).await
    }
}

/// Build a controller around `backend` and process the input.
async fn run_with<B: AnalysisBackend>(
    backend: B,
    source: InputSource,
    args: &Args,
    config: &Config,
) -> Result<i32> {
    let echo = config.general.format == OutputFormat::Terminal && config.general.output.is_none();
    let surface = TerminalSurface::new(echo, config.general.color, args.quiet);
    let controller_config = ControllerConfig {
        timeout: Duration::from_secs(config.backend.timeout_seconds),
    };
    let controller = AnalysisController::new(backend, surface, controller_config);

    if !args.quiet {
        eprintln!("🔎 Fact-check backend: {}", controller.backend().describe());
        eprintln!("   Timeout: {}s", config.backend.timeout_seconds);
    }

    let mut runner = Runner::new(controller, config, args.fail_on_false);

    let submission = match source {
        InputSource::Interactive => {
            if !args.quiet {
                eprintln!(
                    "\n📝 Paste news text or an article URL, one per line. Enter {} to quit.",
                    QUIT_COMMAND
                );
            }
            let stdin = BufReader::new(tokio::io::stdin());
            return runner.run_lines(stdin, !args.quiet).await;
        }
        InputSource::Text(text) => Submission::text(text),
        InputSource::Url(url) => Submission::link(url),
        InputSource::File(path) => Submission::text(read_input_file(&path)?),
    };

    runner.run_once(submission).await
}

/// Handle --show-last: render the stored result again.
fn handle_show_last(config: &Config) -> Result<i32> {
    let store = config.session.store();

    let record = match store.load()? {
        Some(record) => record,
        None => {
            eprintln!(
                "⚠️  No saved analysis found at {}. Run an analysis first.",
                store.path().display()
            );
            return Ok(1);
        }
    };

    eprintln!(
        "📂 Last {} analysis, saved {}",
        record.kind,
        record.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let report = Report {
        result: build_view(&record.response),
        metadata: ReportMetadata {
            submitted: record.submitted,
            analyzed_by: record.analyzed_by,
            analysis_date: record.saved_at,
            duration_seconds: record.duration_seconds,
        },
    };

    if let Some(path) = emit_report(&report, config, false)? {
        eprintln!("✅ Report saved to: {}", path.display());
    }

    Ok(0)
}

/// Read news text from a file, or from stdin for "-".
fn read_input_file(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read news text from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

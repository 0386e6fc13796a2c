//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.newscheck.toml` files.

use crate::cli::OutputFormat;
use crate::session::SessionStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".newscheck.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Fact-check service settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Simulated backend settings.
    #[serde(default)]
    pub mock: MockConfig,

    /// Session storage settings.
    #[serde(default)]
    pub session: SessionConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output format for results.
    #[serde(default)]
    pub format: OutputFormat,

    /// Report file path. Results go to stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Colorize terminal verdict badges.
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            output: None,
            color: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Fact-check service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Root URL of the service; `/check-news` is appended.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Seconds before an in-flight analysis is abandoned.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Use the simulated backend instead of the service.
    #[serde(default)]
    pub mock: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
            mock: false,
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Simulated backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Artificial delay for text submissions.
    #[serde(default = "default_text_delay")]
    pub text_delay_ms: u64,

    /// Artificial delay for link submissions.
    #[serde(default = "default_link_delay")]
    pub link_delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            text_delay_ms: default_text_delay(),
            link_delay_ms: default_link_delay(),
        }
    }
}

fn default_text_delay() -> u64 {
    1500
}

fn default_link_delay() -> u64 {
    2000
}

/// Session storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Save successful results for `--show-last`.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Session file path. Defaults to a file under the temp directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl SessionConfig {
    /// Store at the configured or default path.
    pub fn store(&self) -> SessionStore {
        match self.path {
            Some(ref path) => SessionStore::new(PathBuf::from(path)),
            None => SessionStore::new(SessionStore::default_path()),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref endpoint) = args.endpoint {
            self.backend.endpoint = endpoint.clone();
        }
        if let Some(timeout) = args.timeout {
            self.backend.timeout_seconds = timeout;
        }
        if args.mock {
            self.backend.mock = true;
        }

        if let Some(format) = args.format {
            self.general.format = format;
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }
        if args.no_color {
            self.general.color = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.endpoint, "http://localhost:5000");
        assert_eq!(config.backend.timeout_seconds, 60);
        assert_eq!(config.mock.text_delay_ms, 1500);
        assert_eq!(config.mock.link_delay_ms, 2000);
        assert!(config.session.enabled);
        assert_eq!(config.general.format, OutputFormat::Terminal);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
format = "markdown"
output = "report.md"

[backend]
endpoint = "https://factcheck.example"
timeout_seconds = 30

[session]
enabled = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.format, OutputFormat::Markdown);
        assert_eq!(config.general.output.as_deref(), Some("report.md"));
        assert!(config.general.color);
        assert_eq!(config.backend.endpoint, "https://factcheck.example");
        assert_eq!(config.backend.timeout_seconds, 30);
        assert!(!config.backend.mock);
        assert!(!config.session.enabled);
        assert_eq!(config.mock.link_delay_ms, 2000);
    }

    #[test]
    fn test_merge_only_explicit_args() {
        let mut config: Config = toml::from_str(
            r#"
[backend]
endpoint = "https://factcheck.example"
timeout_seconds = 30
"#,
        )
        .unwrap();

        let args = crate::cli::Args::parse_from(["newscheck", "--text", "news", "--mock"]);
        config.merge_with_args(&args);
        assert_eq!(config.backend.endpoint, "https://factcheck.example");
        assert_eq!(config.backend.timeout_seconds, 30);
        assert!(config.backend.mock);

        let args = crate::cli::Args::parse_from([
            "newscheck",
            "--text",
            "news",
            "--endpoint",
            "http://127.0.0.1:9000",
            "--timeout",
            "5",
            "--no-color",
        ]);
        config.merge_with_args(&args);
        assert_eq!(config.backend.endpoint, "http://127.0.0.1:9000");
        assert_eq!(config.backend.timeout_seconds, 5);
        assert!(!config.general.color);
    }

    #[test]
    fn test_session_store_path() {
        let config = SessionConfig {
            enabled: true,
            path: Some("/tmp/custom/session.json".to_string()),
        };
        assert_eq!(
            config.store().path(),
            Path::new("/tmp/custom/session.json")
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("[mock]"));
        assert!(toml_str.contains("[session]"));
    }
}

//! Session-scoped result storage.
//!
//! The last successful analysis is saved so a later `--show-last` run can
//! display it again, the way the results page picks up what the submit
//! page stored.

use crate::models::{AnalysisResponse, SubmissionKind};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What gets stored for one finished analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub kind: SubmissionKind,
    /// Preview of the submitted text, or the URL.
    pub submitted: String,
    pub analyzed_by: String,
    pub saved_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub response: AnalysisResponse,
}

/// File-backed store holding a single [`SessionRecord`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the system temp directory.
    pub fn default_path() -> PathBuf {
        std::env::temp_dir()
            .join("newscheck")
            .join("last_analysis.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored record.
    pub fn save(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;

        debug!("Saved analysis to {}", self.path.display());
        Ok(())
    }

    /// Load the stored record.
    ///
    /// Returns `Ok(None)` if nothing has been saved yet, `Err` if the file
    /// exists but can't be read.
    pub fn load(&self) -> Result<Option<SessionRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        let record = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))?;

        Ok(Some(record))
    }
}

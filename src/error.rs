//! Error taxonomy for one analysis cycle.

use std::time::Duration;
use thiserror::Error;

/// Broad class of a [`CheckError`], used to pick exit codes and notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, rejected before any request.
    Validation,
    /// The request was abandoned locally.
    Timeout,
    /// The request completed but reported an error or returned bad content.
    TransportOrServer,
    /// Required surface elements are missing.
    PageIntegrity,
}

/// Errors surfaced to the user by the analysis controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("{message}")]
    Validation { message: String },

    #[error("The analysis timed out after {} seconds. Please try again.", .after.as_secs())]
    Timeout { after: Duration },

    /// Non-2xx response. `message` is either the server's own error text or
    /// the generic fallback, never both.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Could not reach the fact-check service: {message}")]
    Transport { message: String },

    #[error("The fact-check service returned an unreadable response: {message}")]
    Parse { message: String },

    #[error("Page is missing required elements: {}", .missing.join(", "))]
    PageIntegrity { missing: Vec<String> },
}

impl CheckError {
    pub fn validation(message: impl Into<String>) -> Self {
        CheckError::Validation {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::Validation { .. } => ErrorKind::Validation,
            CheckError::Timeout { .. } => ErrorKind::Timeout,
            CheckError::Server { .. } | CheckError::Transport { .. } | CheckError::Parse { .. } => {
                ErrorKind::TransportOrServer
            }
            CheckError::PageIntegrity { .. } => ErrorKind::PageIntegrity,
        }
    }
}

/// Generic text used when a failed response carries no readable error.
pub fn generic_server_message(status: u16) -> String {
    format!("Server returned an error (HTTP {})", status)
}

//! Error types for chanreg operations
//!
//! The registry itself is a pure in-memory policy evaluator and has no
//! recoverable runtime errors: resolution never fails, and malformed input is
//! handled permissively (see the crate docs on contract checks). The fallible
//! surfaces are the ones that touch the outside world:
//!
//! - loading project settings from a file or JSON string
//! - parsing a persisted snapshot document
//!
//! Each error variant carries enough context to act on and maps to a stable
//! category for grouping in logs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for chanreg operations
pub type Result<T> = std::result::Result<T, ChanRegError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Reading settings or snapshot data from storage failed
    Io,
    /// Input document was present but malformed
    Validation,
}

/// Errors that can occur when loading configuration or persisted state
#[derive(Error, Debug)]
pub enum ChanRegError {
    /// Failed to read a settings file from disk
    #[error("Failed to load channel settings from '{path}': {reason}")]
    SettingsLoad { path: String, reason: String },

    /// Settings document did not parse against the expected shape
    #[error("Invalid channel settings: {reason}. Check the document against the settings format.")]
    InvalidSettings { reason: String },

    /// A persisted snapshot document was not a record list at all.
    /// Field-level corruption inside records is absorbed during import and
    /// never produces this error.
    #[error("Invalid channel snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

impl ChanRegError {
    /// Get the category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChanRegError::SettingsLoad { .. } => ErrorCategory::Io,
            ChanRegError::InvalidSettings { .. } | ChanRegError::InvalidSnapshot { .. } => {
                ErrorCategory::Validation
            }
        }
    }

    /// Check if retrying the operation might succeed
    ///
    /// Only transient I/O failures are worth retrying; a malformed document
    /// stays malformed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChanRegError::SettingsLoad { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_include_context() {
        let err = ChanRegError::SettingsLoad {
            path: "conf/channels.json".to_string(),
            reason: "No such file or directory".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("conf/channels.json"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_categories() {
        let io = ChanRegError::SettingsLoad {
            path: "x".to_string(),
            reason: "y".to_string(),
        };
        assert_eq!(io.category(), ErrorCategory::Io);
        assert!(io.is_recoverable());

        let bad = ChanRegError::InvalidSnapshot {
            reason: "expected an array".to_string(),
        };
        assert_eq!(bad.category(), ErrorCategory::Validation);
        assert!(!bad.is_recoverable());
    }
}

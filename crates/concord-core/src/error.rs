//! Error types and exit codes for concord
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, unknown note, constraint violation)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the concord CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, unknown entity (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for ConcordError {
    fn from(err: rusqlite::Error) -> Self {
        ConcordError::Other(err.to_string())
    }
}

/// Errors that can occur during concord operations
#[derive(Error, Debug)]
pub enum ConcordError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data/store errors (exit code 3)
    #[error("store not found at {search_root:?} (run `concord init` first)")]
    StoreNotFound { search_root: PathBuf },

    #[error("invalid store: {reason}")]
    InvalidStore { reason: String },

    #[error("note not found: {id}")]
    NoteNotFound { id: String },

    #[error("reviewer not found: {id}")]
    ReviewerNotFound { id: String },

    #[error("unknown rubric domain: {domain} (declared: {declared})")]
    UnknownDomain { domain: String, declared: String },

    #[error("score {score} for domain {domain} exceeds maximum {max}")]
    ScoreOutOfRange {
        domain: String,
        score: f64,
        max: f64,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl ConcordError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        ConcordError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ConcordError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        ConcordError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        ConcordError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ConcordError::UnknownFormat(_)
            | ConcordError::UsageError(_)
            | ConcordError::InvalidValue { .. } => ExitCode::Usage,

            ConcordError::StoreNotFound { .. }
            | ConcordError::InvalidStore { .. }
            | ConcordError::NoteNotFound { .. }
            | ConcordError::ReviewerNotFound { .. }
            | ConcordError::UnknownDomain { .. }
            | ConcordError::ScoreOutOfRange { .. }
            | ConcordError::NotFound { .. }
            | ConcordError::AlreadyExists { .. } => ExitCode::Data,

            ConcordError::Io(_)
            | ConcordError::Json(_)
            | ConcordError::Toml(_)
            | ConcordError::FailedOperation { .. }
            | ConcordError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            ConcordError::UnknownFormat(_) => "unknown_format",
            ConcordError::UsageError(_) => "usage_error",
            ConcordError::StoreNotFound { .. } => "store_not_found",
            ConcordError::InvalidStore { .. } => "invalid_store",
            ConcordError::NoteNotFound { .. } => "note_not_found",
            ConcordError::ReviewerNotFound { .. } => "reviewer_not_found",
            ConcordError::UnknownDomain { .. } => "unknown_domain",
            ConcordError::ScoreOutOfRange { .. } => "score_out_of_range",
            ConcordError::Io(_) => "io_error",
            ConcordError::Json(_) => "json_error",
            ConcordError::Toml(_) => "toml_error",
            ConcordError::InvalidValue { .. } => "invalid_value",
            ConcordError::AlreadyExists { .. } => "already_exists",
            ConcordError::NotFound { .. } => "not_found",
            ConcordError::FailedOperation { .. } => "failed_operation",
            ConcordError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for concord operations
pub type Result<T> = std::result::Result<T, ConcordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            ConcordError::UsageError("bad".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            ConcordError::NoteNotFound { id: "n1".into() }.exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            ConcordError::Other("boom".into()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_json_envelope() {
        let err = ConcordError::ReviewerNotFound { id: "r9".into() };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "reviewer_not_found");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("r9"));
    }

    #[test]
    fn test_score_out_of_range_message() {
        let err = ConcordError::ScoreOutOfRange {
            domain: "technique".into(),
            score: 7.0,
            max: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "score 7 for domain technique exceeds maximum 5"
        );
    }
}

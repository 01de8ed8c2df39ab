//! Application error types.
//!
//! Provides unified error handling with actionable context for the caller.
//! Nothing in this crate retries internally; every variant surfaces to the
//! UI layer as a user-visible failure notice.

use thiserror::Error;

use crate::types::ServiceId;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// File parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Input rejected before any store call (empty liturgy, bad edit index).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Operation addressed to a record that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// Identifier that was not found.
        id: String,
    },

    /// Rows were deleted but the follow-up insert failed.
    ///
    /// The service may be left with zero rows until the save is retried.
    #[error("Partial write on service {service_id}: rows were deleted but the insert failed: {source}")]
    PartialWrite {
        /// Service whose row set is now inconsistent.
        service_id: ServiceId,
        /// The insert failure.
        source: Box<Error>,
    },

    /// Backend failure reported by a store implementation
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error for the given record kind
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    /// Whether this error left persisted state inconsistent.
    pub const fn is_partial_write(&self) -> bool {
        matches!(self, Self::PartialWrite { .. })
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

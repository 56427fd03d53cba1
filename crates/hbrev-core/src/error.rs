//! Unified error handling for handlebars-rev core.
//!
//! Wraps domain and application errors behind one root type, with a category
//! for exit-code mapping and user-actionable suggestions.

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for core operations.
#[derive(Debug, Error, Clone)]
pub enum HbrevError {
    /// Errors from the domain layer (invalid jobs, bad partial names).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, parsing, templates).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl HbrevError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in handlebars-rev".into(),
                "Please report this issue at: https://github.com/cosecruz/handlebars-rev/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The I/O error kind, when this error came from the filesystem.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Application(ApplicationError::Filesystem { kind, .. }) => Some(*kind),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input: invalid job, malformed JSON.
    Validation,
    /// Template syntax or evaluation failure.
    Template,
    /// A file or directory does not exist.
    NotFound,
    /// Everything else: permissions, disk, bugs.
    Internal,
}

/// Convenient result type alias.
pub type HbrevResult<T> = Result<T, HbrevError>;

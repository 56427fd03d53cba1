// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (errors cross the async join point by value)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Cannot derive a partial name from '{path}': {reason}")]
    InvalidPartialName { path: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Provide the '{field}' path"),
                "Use --help for usage information".into(),
            ],
            Self::InvalidPartialName { path, .. } => vec![
                format!("Rename '{path}' so its file name is valid UTF-8"),
                "Partial names come from the file name up to the first '.'".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } | Self::InvalidPartialName { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

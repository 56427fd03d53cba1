//! Application layer errors.
//!
//! These errors represent failures while running the pipeline: reading,
//! parsing, compiling, rendering, writing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during pipeline orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Directory enumeration, file read, or file write failed.
    #[error("Failed to {operation} {}: {reason}", path.display())]
    Filesystem {
        path: PathBuf,
        operation: &'static str,
        kind: io::ErrorKind,
        reason: String,
    },

    /// The data file is not valid JSON.
    #[error("Invalid JSON in {} at line {line}, column {column}: {reason}", path.display())]
    DataParse {
        path: PathBuf,
        line: usize,
        column: usize,
        reason: String,
    },

    /// The main template failed to compile.
    #[error("Template syntax error in {}: {reason}", path.display())]
    TemplateCompile { path: PathBuf, reason: String },

    /// A partial failed to compile during registration.
    #[error("Partial '{name}' ({}) failed to compile: {reason}", path.display())]
    PartialRegistration {
        name: String,
        path: PathBuf,
        reason: String,
    },

    /// Evaluating the template against the data failed.
    #[error("Rendering {} failed: {reason}", path.display())]
    Render { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Build a filesystem error from an `io::Error`.
    pub fn filesystem(path: impl Into<PathBuf>, operation: &'static str, err: &io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            operation,
            kind: err.kind(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, kind, .. } => match kind {
                io::ErrorKind::NotFound => vec![
                    format!("Check that '{}' exists", path.display()),
                    "Relative paths are resolved from the current directory".into(),
                ],
                io::ErrorKind::PermissionDenied => vec![
                    format!("Check the permissions on '{}'", path.display()),
                ],
                io::ErrorKind::InvalidData => vec![
                    format!("'{}' is not valid UTF-8 text", path.display()),
                    "Templates, partials and data must be UTF-8 encoded".into(),
                ],
                _ => vec![
                    format!("Failed to access: {}", path.display()),
                    "Ensure the parent directory exists".into(),
                    "Check available disk space".into(),
                ],
            },
            Self::DataParse { line, column, .. } => vec![
                format!("Fix the JSON near line {line}, column {column}"),
                "Trailing commas and comments are not allowed in JSON".into(),
            ],
            Self::TemplateCompile { .. } | Self::PartialRegistration { .. } => vec![
                "Check for unbalanced {{#block}} / {{/block}} tags".into(),
                "Check that every '{{' has a matching '}}'".into(),
            ],
            Self::Render { .. } => vec![
                "Check that every referenced partial exists in the partials directory".into(),
                "Check helper names and their arguments".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Filesystem { kind, .. } if *kind == io::ErrorKind::NotFound => {
                ErrorCategory::NotFound
            }
            Self::Filesystem { .. } => ErrorCategory::Internal,
            Self::DataParse { .. } => ErrorCategory::Validation,
            Self::TemplateCompile { .. } | Self::PartialRegistration { .. } | Self::Render { .. } => {
                ErrorCategory::Template
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_message_names_operation_and_path() {
        let err = ApplicationError::filesystem(
            "data.json",
            "read file",
            &io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("read file"));
        assert!(msg.contains("data.json"));
    }

    #[test]
    fn parse_error_is_validation() {
        let err = ApplicationError::DataParse {
            path: "data.json".into(),
            line: 3,
            column: 1,
            reason: "trailing comma".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions()[0].contains("line 3"));
    }

    #[test]
    fn render_error_is_template_category() {
        let err = ApplicationError::Render {
            path: "index.hbs".into(),
            reason: "Partial not found nav".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Template);
    }
}

//! Unified error handling for EventDesk Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with categories for status mapping and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for EventDesk Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeskError {
    /// Errors from the domain layer (business rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl DeskError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run: eventdesk config list".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in EventDesk".into(),
                "Please report this issue at: https://github.com/cosecruz/eventdesk/issues".into(),
            ],
        }
    }

    /// Get error category for status codes and display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether repeating the same call might succeed. Nothing in EventDesk
    /// retries on its own; this is advice for the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Application(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Field errors when this is a validation failure.
    pub fn field_errors(&self) -> Option<&crate::domain::FieldErrors> {
        match self {
            Self::Domain(DomainError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}

/// Error categories for status mapping and UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Unauthorized,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type DeskResult<T> = Result<T, DeskError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> DeskResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> DeskResult<T> {
        self.map_err(|e| DeskError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_flow_through_layers() {
        let not_found: DeskError = DomainError::NotFound {
            entity: "Event",
            id: "e1".into(),
        }
        .into();
        assert_eq!(not_found.category(), ErrorCategory::NotFound);

        let unauthorized: DeskError = ApplicationError::Unauthorized.into();
        assert_eq!(unauthorized.category(), ErrorCategory::Unauthorized);

        assert_eq!(
            DeskError::configuration("bad port").category(),
            ErrorCategory::Configuration
        );
    }

    #[test]
    fn exposes_field_errors() {
        let err: DeskError = DomainError::field("name", "Required").into();
        assert_eq!(err.field_errors().unwrap().for_field("name").unwrap(), ["Required"]);
        assert!(DeskError::internal("x").field_errors().is_none());
    }

    #[test]
    fn context_wraps_as_internal() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::other("disk on fire"));
        let err = result.context("writing config").unwrap_err();
        assert!(matches!(
            err,
            DeskError::Internal { ref message } if message.contains("disk on fire")
        ));
    }
}

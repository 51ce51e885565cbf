//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running a use case or talking to a port.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A storage call failed.
    #[error("Repository operation '{operation}' failed: {reason}")]
    Repository {
        operation: &'static str,
        reason: String,
    },

    /// A protected operation was attempted without a session.
    #[error("Unauthorized")]
    Unauthorized,

    /// The remote API answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Remote { status: u16, message: String },

    /// The remote API could not be reached or answered garbage.
    #[error("Transport error: {reason}")]
    Transport { reason: String },

    /// The auth service could not be asked about a session.
    #[error("Session lookup failed: {reason}")]
    SessionLookup { reason: String },
}

impl ApplicationError {
    pub fn repository(operation: &'static str, reason: impl ToString) -> Self {
        Self::Repository {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Repository { operation, .. } => vec![
                format!("Storage failed during '{operation}'"),
                "Check that the database is reachable and migrated".into(),
                "Try: eventdesk migrate".into(),
            ],
            Self::Unauthorized => vec![
                "Sign in before creating, editing or deleting events".into(),
                "Send the session cookie or an 'Authorization: Bearer' header".into(),
            ],
            Self::Remote { status, .. } if *status >= 500 => vec![
                "The server failed to handle the request".into(),
                "The write may or may not have been applied; reload before retrying".into(),
            ],
            Self::Transport { .. } => vec![
                "Check that the API server is running".into(),
                "Check the base URL".into(),
            ],
            Self::SessionLookup { .. } => vec![
                "Check that the auth service is running".into(),
                "Check auth.url in the configuration".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Repository { .. } | Self::Transport { .. } | Self::SessionLookup { .. } => {
                ErrorCategory::Internal
            }
            Self::Unauthorized => ErrorCategory::Unauthorized,
            Self::Remote { status, .. } => match status {
                400 | 422 => ErrorCategory::Validation,
                401 | 403 => ErrorCategory::Unauthorized,
                404 => ErrorCategory::NotFound,
                _ => ErrorCategory::Internal,
            },
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::SessionLookup { .. } => true,
            Self::Remote { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

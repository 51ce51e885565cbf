//! Error handling for the EventDesk binary.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping
//!
//! HTTP handlers do not use this type; they map `DeskError` straight to
//! envelopes in `crate::http::response`.

use std::{error::Error, fmt, path::PathBuf};

use owo_colors::OwoColorize;
use thiserror::Error;

use eventdesk_core::error::DeskError;

// Re-export so callers only need `use crate::error::*`.
pub use eventdesk_core::error::ErrorCategory as CoreCategory;

/// Result type alias for command operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unknown config key: '{key}'")]
    UnknownConfigKey { key: String },

    #[error("Config already exists at {path}")]
    ConfigExists { path: PathBuf },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `eventdesk-core` or an adapter.
    #[error("{0}")]
    Core(#[from] DeskError),

    // ── System errors ──────────────────────────────────────────────────────
    /// The listener could not be bound.
    #[error("Cannot listen on {address}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl ServerError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'eventdesk init' to create a default config".into(),
            ],

            Self::UnknownConfigKey { key } => vec![
                format!("'{key}' is not a configuration key"),
                "Use 'eventdesk config list' to see every key".into(),
            ],

            Self::ConfigExists { path } => vec![
                format!("The file '{}' already exists", path.display()),
                "Use --force to overwrite it".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::Bind { address, .. } => vec![
                format!("Another process may already be listening on {address}"),
                "Pick another port with --port or PORT".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::UnknownConfigKey { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Unauthorized => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Bind { .. } | Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Every cause below this error, outermost first.
    fn causes(&self) -> Vec<String> {
        std::iter::successors(self.source(), |&err| err.source())
            .map(ToString::to_string)
            .collect()
    }

    /// Coloured report for a terminal.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut out = format!(
            "\n{} {}\n  {}\n",
            "✗".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  {} {}\n", "→".dimmed(), cause.dimmed()));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in &suggestions {
                out.push_str(&format!("  • {suggestion}\n"));
            }
        }

        if !verbose {
            let hint = "Run again with --verbose for the full cause chain.";
            out.push_str(&format!("\n{}\n", hint.dimmed()));
        }
        out
    }

    /// The same report without ANSI codes, for pipes and log files.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  Caused by: {cause}\n"));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for suggestion in &suggestions {
                out.push_str(&format!("  - {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str("\nRun again with --verbose for the full cause chain.\n");
        }
        out
    }

    /// Record the failure before it is printed.
    pub fn log(&self) {
        let category = self.category();
        let code = self.exit_code();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(%category, code, "{self}");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(%category, code, "{self}");
            }
        }
        for cause in self.causes() {
            tracing::debug!(%cause, "Caused by");
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UserError => "user error",
            Self::NotFound => "not found",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        })
    }
}

// ── IntoServer trait ──────────────────────────────────────────────────────────

/// Extension trait to convert I/O results into [`ServerError`] at call-sites
/// with a descriptive context message.
pub trait IntoServer<T> {
    fn with_server_context<F, S>(self, f: F) -> ServerResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoServer<T> for Result<T, std::io::Error> {
    fn with_server_context<F, S>(self, f: F) -> ServerResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| ServerError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_core::prelude::{ApplicationError, DomainError};
    use std::io;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn bind_suggests_another_port() {
        let err = ServerError::Bind {
            address: "127.0.0.1:3000".into(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--port")));
    }

    #[test]
    fn core_suggestions_pass_through() {
        let err = ServerError::from(DeskError::from(DomainError::UnknownEntity("venues".into())));
        assert!(err.suggestions().iter().any(|s| s.contains("eventdesk entities")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        let err = ServerError::ConfigExists {
            path: PathBuf::from("eventdesk.toml"),
        };
        assert_eq!(err.exit_code(), 2);
        let err = ServerError::from(DeskError::from(ApplicationError::Unauthorized));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        let err = ServerError::from(DeskError::from(DomainError::UnknownEntity("x".into())));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            ServerError::UnknownConfigKey { key: "x".into() }.exit_code(),
            4
        );
        assert_eq!(ServerError::from(DeskError::configuration("bad url")).exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        let err = ServerError::from(DeskError::from(ApplicationError::repository(
            "migrate",
            "disk full",
        )));
        assert_eq!(err.exit_code(), 1);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = ServerError::ConfigExists {
            path: PathBuf::from("/tmp/x.toml"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = ServerError::Bind {
            address: "127.0.0.1:1".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: denied"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoServer ────────────────────────────────────────────────────────

    #[test]
    fn into_server_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let mapped = result.with_server_context(|| "reading config");
        assert!(matches!(
            mapped,
            Err(ServerError::IoError { ref message, .. }) if message == "reading config"
        ));
    }
}

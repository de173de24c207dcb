//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `ConfigError` and `ImportError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use backoffice_config::ConfigError;
use backoffice_core::{CoreError, ImportError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(backoffice::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             URL: {url}\n\
             Override with: backoffice --api-url <URL> ..."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(backoffice::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(backoffice::not_found))]
    NotFound {
        message: String,
        #[help]
        hint: Option<String>,
    },

    #[error("Rejected by the backend ({status}): {message}")]
    #[diagnostic(code(backoffice::rejected))]
    Rejected { message: String, status: u16 },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Backend error: {message}")]
    #[diagnostic(code(backoffice::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Import ───────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(backoffice::import),
        help("Get a starting file with: backoffice import template --out products.csv")
    )]
    Import(#[from] ImportError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(backoffice::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(backoffice::config),
        help("Inspect the effective configuration with: backoffice config show")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(backoffice::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(
        code(backoffice::json),
        help("Pass a JSON object with the fields to change.")
    )]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(backoffice::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { status: 409, .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Import(_)
            | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Point a not-found error at the command that lists what exists.
    /// Other errors pass through unchanged.
    pub fn with_list_hint(self, list_command: &str) -> Self {
        match self {
            Self::NotFound { message, .. } => Self::NotFound {
                message,
                hint: Some(format!("Run: backoffice {list_command} to see what exists")),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound { message } => CliError::NotFound {
                message,
                hint: None,
            },

            CoreError::Rejected { message, status } => CliError::Rejected { message, status },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(ConfigError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_exit_codes() {
        let cases = [
            (
                CoreError::ConnectionFailed {
                    url: "http://localhost:8000".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (CoreError::Timeout, exit_code::TIMEOUT),
            (
                CoreError::NotFound {
                    message: "Category 9".into(),
                },
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::Rejected {
                    message: "exists".into(),
                    status: 409,
                },
                exit_code::CONFLICT,
            ),
            (
                CoreError::ValidationFailed {
                    message: "message is required".into(),
                },
                exit_code::USAGE,
            ),
            (
                CoreError::Api {
                    message: "boom".into(),
                    status: Some(500),
                },
                exit_code::GENERAL,
            ),
        ];

        for (core, expected) in cases {
            assert_eq!(CliError::from(core).exit_code(), expected);
        }
    }

    #[test]
    fn not_found_hint_names_the_callers_list_command() {
        let err = CliError::from(CoreError::NotFound {
            message: "Conversation user 9".into(),
        })
        .with_list_hint("conversations list");

        let help = err.help().map(|h| h.to_string());
        assert_eq!(
            help.as_deref(),
            Some("Run: backoffice conversations list to see what exists")
        );
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn list_hint_leaves_other_errors_alone() {
        let err = CliError::from(CoreError::Timeout).with_list_hint("categories list");
        assert!(matches!(err, CliError::Timeout));
    }

    #[test]
    fn import_errors_are_usage_errors() {
        let err = CliError::from(ImportError::TooLarge {
            size: 12,
            limit: 10,
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("too large"));
    }
}

// ── Core error types ──
//
// User-facing errors from backoffice-core. Consumers never see reqwest
// errors or JSON parse failures directly: the `From<backoffice_api::Error>`
// impl translates transport-layer errors into domain messages.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("The backend did not answer in time")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Rejected by the backend: {message}")]
    Rejected { message: String, status: u16 },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Backend error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<backoffice_api::Error> for CoreError {
    fn from(err: backoffice_api::Error) -> Self {
        match err {
            ref e if e.is_not_found() => CoreError::NotFound {
                message: err.message(),
            },
            backoffice_api::Error::RequestFailed { status, .. }
                if matches!(status, 400 | 409 | 422) =>
            {
                CoreError::Rejected {
                    message: err.message(),
                    status,
                }
            }
            backoffice_api::Error::RequestFailed { status, .. } => CoreError::Api {
                message: err.message(),
                status: Some(status),
            },
            backoffice_api::Error::BadRequest { message } => {
                CoreError::ValidationFailed { message }
            }
            backoffice_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            backoffice_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            backoffice_api::Error::Build(message) => CoreError::Config { message },
            backoffice_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response: {message}"))
            }
        }
    }
}

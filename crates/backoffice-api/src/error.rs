use thiserror::Error;

/// Top-level error type for the `backoffice-api` crate.
///
/// Covers every failure mode of the HTTP boundary: non-success statuses,
/// requests rejected before they leave the process, transport failures and
/// undecodable payloads. `backoffice-core` maps these into user-facing
/// domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Status ──────────────────────────────────────────────────────
    /// The backend answered with a non-success status code.
    ///
    /// `detail` carries the backend's `{"detail": "..."}` message when the
    /// error body has one.
    #[error("Request failed (HTTP {status}): {status_text}")]
    RequestFailed {
        status: u16,
        status_text: String,
        detail: Option<String>,
    },

    /// Rejected client-side before any network call was made.
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing or joining error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status associated with this error, if any.
    ///
    /// Client-side rejections report `400` so callers can treat them like
    /// a backend validation failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::BadRequest { .. } => Some(400),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The most specific human-readable message available.
    ///
    /// Prefers the backend's `detail` over the bare status text.
    pub fn message(&self) -> String {
        match self {
            Self::RequestFailed {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::RequestFailed { status_text, .. } => status_text.clone(),
            Self::BadRequest { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_prefers_detail() {
        let err = Error::RequestFailed {
            status: 409,
            status_text: "Conflict".into(),
            detail: Some("Category already exists".into()),
        };
        assert_eq!(err.message(), "Category already exists");
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_not_found());
    }

    #[test]
    fn bad_request_reports_400() {
        let err = Error::BadRequest {
            message: "message is required".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "message is required");
    }

    #[test]
    fn not_found_is_detected_from_status() {
        let err = Error::RequestFailed {
            status: 404,
            status_text: "Not Found".into(),
            detail: None,
        };
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Not Found");
    }
}

//! Error types for GufoRAG client operations.
//!
//! Every failure is local to a single API call: transport faults and
//! server rejections surface as a [`GufoError`], the driver reports them
//! and skips dependent steps. Nothing is retried.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type GufoResult<T> = Result<T, GufoError>;

/// Unified error type for GufoRAG API calls.
#[derive(Debug, Error)]
pub enum GufoError {
    /// Transport-level fault: connection refused, DNS failure, timeout,
    /// or a mid-stream read error. Aborts the whole call.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-streamed response body failed to decode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to the output sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with a structured error envelope.
    #[error("API error ({status}): {message} (code: {code})")]
    Api {
        status: u16,
        code: i32,
        message: String,
    },

    /// Non-success status whose body was not a recognizable envelope.
    #[error("HTTP status {0}")]
    Status(u16),
}

impl GufoError {
    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GufoError::Api { status, .. } | GufoError::Status(status) => Some(*status),
            GufoError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = GufoError::Api {
            status: 422,
            code: 1001,
            message: "config not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (422): config not found (code: 1001)"
        );
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_status_error_display() {
        let err = GufoError::Status(502);
        assert_eq!(err.to_string(), "HTTP status 502");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: GufoError = json_err.into();
        assert!(matches!(err, GufoError::Json(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: GufoError = io_err.into();
        assert!(matches!(err, GufoError::Io(_)));
    }
}

use reqwest::StatusCode;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stream could not be opened at all; no fragment was read
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    /// Stream closed or errored mid-flight; `partial` holds everything
    /// aggregated before the failure
    #[error("Stream interrupted after {} bytes: {message}", .partial.len())]
    StreamInterrupted { partial: String, message: String },

    /// Backend answered with a non-success status
    #[error("Backend error ({status}): {message}")]
    Backend { status: StatusCode, message: String },

    /// Response body could not be decoded into the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// HTTP request error (preserves reqwest::Error for connect detection)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
}

impl ClientError {
    /// Classify a reqwest error raised while opening a request.
    ///
    /// Connection-level failures become `TransportUnavailable` so callers can
    /// distinguish "backend is down" from "backend rejected the request".
    pub fn from_send_error(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::TransportUnavailable(err.to_string())
        } else {
            Self::HttpRequest(err)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ClientError::TransportUnavailable("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Transport unavailable: connection refused"
        );
    }

    #[test]
    fn test_interrupted_reports_partial_length() {
        let error = ClientError::StreamInterrupted {
            partial: "hello".to_string(),
            message: "reset by peer".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Stream interrupted after 5 bytes: reset by peer"
        );
    }

    #[test]
    fn test_backend_error_display() {
        let error = ClientError::Backend {
            status: StatusCode::BAD_GATEWAY,
            message: "upstream down".to_string(),
        };
        assert!(error.to_string().contains("502"));
        assert!(error.to_string().contains("upstream down"));
    }
}

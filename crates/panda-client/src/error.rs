//! Error types for the client library.

use thiserror::Error;

/// Errors that can occur while issuing a proxied request.
///
/// Every failure of a call maps to exactly one variant. Any HTTP status,
/// including 4xx and 5xx, is a response rather than an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// No payload was supplied, so there is nothing to attach the token to.
    #[error("Missing payload: a JSON object is required to carry the access token")]
    MissingPayload,

    /// The target URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client configuration issue.
    ///
    /// The proxy URL is unusable or the HTTP session could not be built.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The proxy could not be reached, or it closed the connection.
    #[error("Connection error: {0}")]
    ConnectionError(#[source] reqwest::Error),

    /// The call took longer than the configured total timeout.
    #[error("Timeout error")]
    TimeoutError(#[source] reqwest::Error),

    /// Any other transport failure.
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// A body could not be encoded or decoded as JSON.
    ///
    /// On the response side this covers bodies that are not UTF-8 JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The response body was valid JSON but not an object.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(err)
        } else if err.is_connect() {
            Self::ConnectionError(err)
        } else {
            Self::NetworkError(err)
        }
    }
}

impl ClientError {
    /// Check if this error is potentially retryable.
    ///
    /// Returns `true` for transport failures and timeouts. The client itself
    /// never retries; this is for callers that do.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_) | Self::TimeoutError(_) | Self::NetworkError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_input_errors_are_not_retryable() {
        for err in [
            ClientError::MissingPayload,
            ClientError::InvalidUrl("nope".to_string()),
            ClientError::ConfigurationError("bad proxy".to_string()),
        ] {
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn test_response_errors() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ClientError::from(parse_err);

        assert!(matches!(err, ClientError::SerializationError(_)));
        assert!(!err.is_retryable());

        let err = ClientError::InvalidResponse("expected a JSON object".to_string());
        assert_eq!(err.to_string(), "Invalid response: expected a JSON object");
    }
}

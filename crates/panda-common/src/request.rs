use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Payload key the access token is written to.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// JSON object sent as a request body and returned as a response body.
pub type Payload = Map<String, Value>;

/// HTTP methods the client can issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`, with the payload still sent as a JSON body.
    #[default]
    Get,
    /// `POST`.
    Post,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a supported HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method '{0}', expected 'GET' or 'POST'")]
pub struct ParseHttpMethodError(pub String);

impl FromStr for HttpMethod {
    type Err = ParseHttpMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            _ => Err(ParseHttpMethodError(s.to_string())),
        }
    }
}

/// A response whose body parsed as a JSON object.
///
/// Any HTTP status counts as a response here, including 4xx and 5xx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed response body.
    pub body: Payload,
}

/// Normalized `(status, message, body)` outcome of a single call.
///
/// On success `status_code` is the HTTP status and `message` is empty. On
/// failure `status_code` is `-1`, `message` holds the diagnostic trace of the
/// error and its causes, and `body` is empty.
///
/// # Examples
///
/// ```
/// use panda_common::{JsonResponse, Payload, RequestOutcome};
///
/// let ok: RequestOutcome = Ok::<_, std::io::Error>(JsonResponse {
///     status: 200,
///     body: Payload::new(),
/// })
/// .into();
/// assert!(ok.is_success());
///
/// let failed: RequestOutcome =
///     Err::<JsonResponse, _>(std::io::Error::other("connection reset")).into();
/// let (status, message, body) = failed.into_tuple();
/// assert_eq!(status, -1);
/// assert!(message.contains("connection reset"));
/// assert!(body.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    /// HTTP status, or `-1` when no response was obtained.
    pub status_code: i32,
    /// Empty on success, diagnostic trace on failure.
    pub message: String,
    /// Response body, empty on failure.
    pub body: Payload,
}

impl RequestOutcome {
    /// Status code reported for calls that produced no usable response.
    pub const FAILED_STATUS: i32 = -1;

    /// Builds a failure outcome from any error, rendering the full cause chain.
    pub fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self {
            status_code: Self::FAILED_STATUS,
            message: format!("{:?}", error.into()),
            body: Payload::new(),
        }
    }

    /// Returns `true` when a response was obtained.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code != Self::FAILED_STATUS
    }

    /// Splits the outcome into a plain tuple.
    #[must_use]
    pub fn into_tuple(self) -> (i32, String, Payload) {
        (self.status_code, self.message, self.body)
    }
}

impl From<JsonResponse> for RequestOutcome {
    fn from(response: JsonResponse) -> Self {
        Self {
            status_code: i32::from(response.status),
            message: String::new(),
            body: response.body,
        }
    }
}

impl<E> From<Result<JsonResponse, E>> for RequestOutcome
where
    E: Into<anyhow::Error>,
{
    fn from(result: Result<JsonResponse, E>) -> Self {
        match result {
            Ok(response) => response.into(),
            Err(error) => Self::failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::Context;
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => unreachable!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_http_method_parse() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("DELETE".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn test_http_method_serde() {
        assert_eq!(serde_json::to_value(HttpMethod::Post).unwrap(), json!("POST"));
        let method: HttpMethod = serde_json::from_value(json!("GET")).unwrap();
        assert_eq!(method, HttpMethod::Get);
    }

    #[test]
    fn test_outcome_from_response() {
        let response = JsonResponse {
            status: 201,
            body: body(json!({"id": 7})),
        };
        let outcome = RequestOutcome::from(response);

        assert!(outcome.is_success());
        assert_eq!(
            outcome.into_tuple(),
            (201, String::new(), body(json!({"id": 7})))
        );
    }

    #[test]
    fn test_outcome_keeps_error_status_codes() {
        let outcome = RequestOutcome::from(JsonResponse {
            status: 500,
            body: body(json!({"error": "boom"})),
        });

        assert!(outcome.is_success());
        assert_eq!(outcome.status_code, 500);
        assert!(outcome.message.is_empty());
    }

    #[test]
    fn test_outcome_failure_renders_cause_chain() {
        let result = Err::<JsonResponse, _>(std::io::Error::other("connection reset"))
            .context("request to http://example.test/api failed");
        let outcome = RequestOutcome::from(result);

        assert!(!outcome.is_success());
        assert_eq!(outcome.status_code, -1);
        assert!(outcome.body.is_empty());
        assert!(outcome.message.contains("request to http://example.test/api failed"));
        assert!(outcome.message.contains("connection reset"));
    }
}

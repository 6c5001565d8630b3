//! Proxy-routed JSON client.
//!
//! Every call opens its own HTTP session, routes it through the configured
//! proxy, and writes the access token into a copy of the caller's payload
//! before sending it.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Proxy};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use panda_common::{
    ACCESS_TOKEN_KEY, ClientOptions, Config, HttpMethod, JsonResponse, Payload, RequestOutcome,
};

use crate::error::ClientError;

/// HTTP client that sends every request through a proxy with an access token.
///
/// Holds no connection state: each call to [`PandaClient::request`] builds a
/// session, uses it once, and drops it. The client is cheaply cloneable and
/// can be shared across tasks.
///
/// # Examples
///
/// ```no_run
/// use panda_client::PandaClient;
/// use panda_common::{Config, HttpMethod, Payload};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = PandaClient::new(Config::new("127.0.0.1:8080", "secret-token"))?;
///
/// let mut payload = Payload::new();
/// payload.insert("a".to_string(), 1.into());
///
/// let response = client
///     .request("http://example.test/api", Some(&payload), HttpMethod::Post)
///     .await?;
/// println!("{} {:?}", response.status, response.body);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PandaClient {
    token: Arc<SecretString>,
    proxy_url: String,
    headers: HeaderMap,
    timeout: Duration,
    ssl_enabled: bool,
}

impl PandaClient {
    /// Creates a client with the default options (60s timeout, TLS
    /// verification off).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConfigurationError`] if the proxy URL derived
    /// from `config` is not usable.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        Self::with_options(config, ClientOptions::default())
    }

    /// Creates a client with explicit timeout and TLS settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConfigurationError`] if the proxy URL derived
    /// from `config` is not usable.
    pub fn with_options(config: Config, options: ClientOptions) -> Result<Self, ClientError> {
        let proxy_url = config.proxy_url();

        // Fail at construction rather than on the first call
        proxy(&proxy_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            token: Arc::new(config.token().clone()),
            proxy_url,
            headers,
            timeout: options.timeout,
            ssl_enabled: options.ssl_enabled,
        })
    }

    /// Proxy every call is routed through.
    #[must_use]
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// Headers attached to every call.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Total timeout of a single call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether TLS certificates are verified.
    #[must_use]
    pub const fn ssl_enabled(&self) -> bool {
        self.ssl_enabled
    }

    /// Sends one JSON request through the proxy and parses the JSON reply.
    ///
    /// The payload is copied and `access_token` is set on the copy, replacing
    /// any value the caller put there. The caller's map is left untouched.
    /// The body is sent for `GET` as well as `POST`.
    ///
    /// Any HTTP status is returned as a [`JsonResponse`]. Exactly one network
    /// attempt is made.
    ///
    /// # Arguments
    ///
    /// * `url` - Target URL; the proxy forwards the request there
    /// * `payload` - JSON object to send; `None` is rejected
    /// * `method` - `GET` or `POST`
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingPayload`] if `payload` is `None`
    /// - [`ClientError::InvalidUrl`] if `url` does not parse
    /// - [`ClientError::ConnectionError`], [`ClientError::TimeoutError`] or
    ///   [`ClientError::NetworkError`] on transport failure
    /// - [`ClientError::SerializationError`] if the reply is not UTF-8 JSON
    /// - [`ClientError::InvalidResponse`] if the reply is not a JSON object
    pub async fn request(
        &self,
        url: &str,
        payload: Option<&Payload>,
        method: HttpMethod,
    ) -> Result<JsonResponse, ClientError> {
        let payload = payload.ok_or(ClientError::MissingPayload)?;

        let target = url::Url::parse(url)
            .map_err(|e| ClientError::InvalidUrl(format!("'{url}': {e}")))?;

        let body = serde_json::to_string(&self.authorize(payload))?;

        let session = self.open_session()?;

        debug!("{method} {target} via {}", self.proxy_url);

        let response = session
            .request(to_reqwest_method(method), target)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        // Raw bytes: the body is always UTF-8 JSON, whatever charset the server claims
        let bytes = response.bytes().await?;
        debug!("Response status {status}, {} bytes", bytes.len());

        let body = parse_body(&bytes)?;

        Ok(JsonResponse { status, body })
    }

    /// Like [`PandaClient::request`], folded into a [`RequestOutcome`].
    ///
    /// Failures come back as `(-1, <diagnostic trace>, {})` and are logged at
    /// `warn` level.
    pub async fn request_outcome(
        &self,
        url: &str,
        payload: Option<&Payload>,
        method: HttpMethod,
    ) -> RequestOutcome {
        let outcome = RequestOutcome::from(self.request(url, payload, method).await);

        if !outcome.is_success() {
            warn!("{method} {url} failed: {}", outcome.message);
        }

        outcome
    }

    /// Copies `payload` and writes the access token into the copy.
    fn authorize(&self, payload: &Payload) -> Payload {
        let mut body = payload.clone();
        body.insert(
            ACCESS_TOKEN_KEY.to_string(),
            Value::String(self.token.expose_secret().to_string()),
        );
        body
    }

    /// Builds the per-call session.
    fn open_session(&self) -> Result<reqwest::Client, ClientError> {
        reqwest::Client::builder()
            .proxy(proxy(&self.proxy_url)?)
            .default_headers(self.headers.clone())
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.ssl_enabled)
            .build()
            .map_err(|e| ClientError::ConfigurationError(format!("cannot open HTTP session: {e}")))
    }
}

impl std::fmt::Debug for PandaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PandaClient")
            .field("token", &"[REDACTED]")
            .field("proxy_url", &self.proxy_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("ssl_enabled", &self.ssl_enabled)
            .finish()
    }
}

fn proxy(proxy_url: &str) -> Result<Proxy, ClientError> {
    Proxy::all(proxy_url)
        .map_err(|e| ClientError::ConfigurationError(format!("invalid proxy '{proxy_url}': {e}")))
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

fn parse_body(bytes: &[u8]) -> Result<Payload, ClientError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        other => Err(ClientError::InvalidResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

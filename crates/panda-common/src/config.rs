use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Default total request timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// TLS certificate verification is off unless explicitly enabled.
pub const DEFAULT_SSL_ENABLED: bool = false;

/// Scheme used to reach the proxy itself.
///
/// This is the scheme of the proxy endpoint, not of the target URL. An
/// `http` proxy can still tunnel `https` targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyScheme {
    /// Plain HTTP proxy (the default).
    #[default]
    Http,
    /// Proxy reached over TLS.
    Https,
}

impl ProxyScheme {
    /// Returns the scheme as it appears in a URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for ProxyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a supported proxy scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported proxy scheme '{0}', expected 'http' or 'https'")]
pub struct ParseProxySchemeError(pub String);

impl FromStr for ProxyScheme {
    type Err = ParseProxySchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(ParseProxySchemeError(s.to_string())),
        }
    }
}

/// Connection parameters: where the proxy lives and which token to send.
///
/// Pure data holder. Nothing is validated here; an unusable proxy address is
/// reported when a client is built from this configuration.
///
/// The token is stored as a [`SecretString`], so it never appears in
/// `Debug` output and is never serialized.
///
/// # Examples
///
/// ```
/// use panda_common::{Config, ProxyScheme};
///
/// let config = Config::new("127.0.0.1:8080", "secret-token");
/// assert_eq!(config.proxy_url(), "http://127.0.0.1:8080");
///
/// let config = config.with_proxy_scheme(ProxyScheme::Https);
/// assert_eq!(config.proxy_url(), "https://127.0.0.1:8080");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Proxy host and port, e.g. `10.0.0.5:3128`.
    pub proxy_address: String,
    /// Scheme used to reach the proxy.
    #[serde(default)]
    pub proxy_scheme: ProxyScheme,
    /// Access token injected into every request payload.
    token: SecretString,
}

impl Config {
    /// Creates a configuration for an `http` proxy.
    pub fn new(proxy_address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            proxy_address: proxy_address.into(),
            proxy_scheme: ProxyScheme::default(),
            token: SecretString::new(token.into().into()),
        }
    }

    /// Sets the scheme used to reach the proxy.
    #[must_use]
    pub const fn with_proxy_scheme(mut self, proxy_scheme: ProxyScheme) -> Self {
        self.proxy_scheme = proxy_scheme;
        self
    }

    /// Access token. Fixed at construction.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// Full proxy URL, `{scheme}://{address}`.
    #[must_use]
    pub fn proxy_url(&self) -> String {
        format!("{}://{}", self.proxy_scheme, self.proxy_address)
    }
}

/// Per-client transport options.
///
/// `ssl_enabled == false` turns TLS certificate verification off for every
/// call the client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ClientOptions {
    /// Total timeout for a single call, from connect to the end of the body.
    #[serde(
        rename = "timeout_seconds",
        default = "default_timeout",
        deserialize_with = "deserialize_seconds"
    )]
    pub timeout: Duration,
    /// Whether TLS certificates are verified.
    #[serde(default)]
    pub ssl_enabled: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            ssl_enabled: DEFAULT_SSL_ENABLED,
        }
    }
}

impl ClientOptions {
    /// Sets the total request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables TLS certificate verification.
    #[must_use]
    pub const fn with_ssl(mut self, ssl_enabled: bool) -> Self {
        self.ssl_enabled = ssl_enabled;
        self
    }
}

const fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

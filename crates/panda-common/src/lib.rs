//! # panda-common
//!
//! Configuration and request/response types shared by the panda HTTP client.
//!
//! - [`Config`]: proxy address, proxy scheme and the access token
//! - [`ClientOptions`]: timeout and TLS verification
//! - [`HttpMethod`], [`Payload`]: what goes out on a call
//! - [`JsonResponse`], [`RequestOutcome`]: what comes back
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use panda_common::{ClientOptions, Config, HttpMethod};
//!
//! let config = Config::new("127.0.0.1:8080", "secret-token");
//! let options = ClientOptions::default().with_timeout(Duration::from_secs(10));
//!
//! assert_eq!(config.proxy_url(), "http://127.0.0.1:8080");
//! assert!(!options.ssl_enabled);
//! assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
//! ```

/// Proxy and transport configuration.
pub mod config;
/// Request methods, payloads and normalized outcomes.
pub mod request;

pub use config::{
    ClientOptions, Config, DEFAULT_SSL_ENABLED, DEFAULT_TIMEOUT, ParseProxySchemeError,
    ProxyScheme,
};
pub use request::{
    ACCESS_TOKEN_KEY, HttpMethod, JsonResponse, ParseHttpMethodError, Payload, RequestOutcome,
};

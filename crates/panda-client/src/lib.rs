//! # panda-client
//!
//! Async JSON HTTP client that routes every call through a proxy and injects
//! a pre-shared access token into every payload.
//!
//! - One call, one scoped session, one network attempt
//! - `GET` and `POST`, both carrying a JSON body
//! - Results as `Result<JsonResponse, ClientError>`, or folded into the
//!   normalized `(status, message, body)` [`RequestOutcome`]
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use panda_client::PandaClient;
//! use panda_common::{ClientOptions, Config, HttpMethod, Payload};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::new("127.0.0.1:8080", "secret-token");
//! let options = ClientOptions::default().with_timeout(Duration::from_secs(10));
//! let client = PandaClient::with_options(config, options)?;
//!
//! let mut payload = Payload::new();
//! payload.insert("a".to_string(), 1.into());
//!
//! let (status, message, body) = client
//!     .request_outcome("http://example.test/api", Some(&payload), HttpMethod::Post)
//!     .await
//!     .into_tuple();
//!
//! if status == -1 {
//!     eprintln!("request failed:\n{message}");
//! } else {
//!     println!("{status}: {body:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::PandaClient;
pub use error::ClientError;

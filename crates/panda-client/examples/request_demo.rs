//! Proxied Request Demo
//!
//! Sends a single JSON request through a proxy and prints the normalized
//! `(status, message, body)` outcome.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example request_demo -- \
//!     --proxy 127.0.0.1:8080 --token secret-token \
//!     --url http://example.test/api --method POST --payload '{"a": 1}'
//!
//! # Token from the environment, HTTPS proxy, 10 second timeout
//! PANDA_TOKEN=secret-token cargo run --example request_demo -- \
//!     --proxy proxy.internal:3128 --scheme https --timeout-secs 10 \
//!     --url https://example.test/api
//! ```

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use panda_client::PandaClient;
use panda_common::{ClientOptions, Config, HttpMethod, Payload, ProxyScheme};

#[derive(Parser, Debug)]
#[command(author, version, about = "Proxied JSON request demo")]
struct Args {
    /// Proxy host and port
    #[arg(long, default_value = "127.0.0.1:8080")]
    proxy: String,

    /// Scheme used to reach the proxy (http or https)
    #[arg(long, default_value = "http")]
    scheme: ProxyScheme,

    /// Access token injected into the payload
    #[arg(long, env = "PANDA_TOKEN")]
    token: String,

    /// Target URL
    #[arg(long)]
    url: String,

    /// HTTP method (GET or POST)
    #[arg(long, default_value = "GET")]
    method: HttpMethod,

    /// JSON object to send
    #[arg(long, default_value = "{}")]
    payload: String,

    /// Total request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Verify TLS certificates
    #[arg(long)]
    ssl: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let payload: Payload = match serde_json::from_str::<serde_json::Value>(&args.payload)
        .with_context(|| format!("--payload is not valid JSON: {}", args.payload))?
    {
        serde_json::Value::Object(map) => map,
        other => bail!("--payload must be a JSON object, got {other}"),
    };

    let config = Config::new(&args.proxy, args.token).with_proxy_scheme(args.scheme);
    let options = ClientOptions::default()
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_ssl(args.ssl);

    let client = PandaClient::with_options(config, options)?;
    info!("Client: {client:?}");

    let (status, message, body) = client
        .request_outcome(&args.url, Some(&payload), args.method)
        .await
        .into_tuple();

    println!("status:  {status}");
    if !message.is_empty() {
        println!("message:\n{message}");
    }
    println!("body:    {}", serde_json::to_string_pretty(&body)?);

    Ok(())
}

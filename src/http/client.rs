//! The shared HTTP client.
//!
//! Catalog queries and jar transfers all go through one
//! [`ClientWithMiddleware`]. Transient failures (connection errors, 5xx,
//! 429) are retried with exponential backoff and each request gets its own
//! tracing span.
//!
//! # Examples
//!
//! ```rust
//! use mcprov::http::{create_http_client, HttpClientConfig};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(
//!     HttpClientConfig::default()
//!         .with_retries(5)
//!         .with_timeout(Duration::from_secs(30)),
//! )?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// `mcprov/<crate version>`
pub fn user_agent() -> String {
    format!("mcprov/{}", env!("CARGO_PKG_VERSION"))
}

/// Knobs of the shared client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Retries on top of the first attempt.
    pub retries: u32,
    /// Longest wait for a connection, or for the next bytes of a response.
    /// A transfer that keeps receiving data is never cut off.
    pub timeout: Duration,
    pub proxy: Option<Proxy>,
    /// Pick up `HTTP_PROXY` and friends from the environment.
    pub use_system_proxy: bool,
    /// Sent with every request.
    pub headers: Option<HeaderMap>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            use_system_proxy: true,
            headers: None,
            user_agent: user_agent(),
        }
    }
}

impl HttpClientConfig {
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    fn reqwest_builder(self) -> reqwest::ClientBuilder {
        let builder = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .connect_timeout(self.timeout)
            .read_timeout(self.timeout);
        let builder = match self.use_system_proxy {
            true => builder,
            false => builder.no_proxy(),
        };
        let builder = match self.proxy {
            Some(proxy) => builder.proxy(proxy),
            None => builder,
        };
        match self.headers {
            Some(headers) => builder.default_headers(headers),
            None => builder,
        }
    }
}

/// Build the shared client from `config`.
///
/// Fails only when reqwest cannot set up its TLS backend or the proxy.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let backoff = ExponentialBackoff::builder().build_with_max_retries(config.retries);
    let inner = config.reqwest_builder().build()?;

    Ok(ClientBuilder::new(inner)
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(backoff))
        .build())
}

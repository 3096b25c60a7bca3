//! Configuration of the acquisition engine.

use super::outcome::ModOutcome;
use crate::http::client::{HttpClientConfig, DEFAULT_RETRIES, DEFAULT_TIMEOUT};
use crate::StyleOptions;

use reqwest::header::HeaderMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DIRECTORY: &str = "mods";

/// Callback invoked as each mod entry finishes.
pub type OutcomeCallback = Box<dyn Fn(&ModOutcome) + Send + Sync>;

/// Everything an [`Acquirer`](super::Acquirer) needs besides the sources.
#[derive(Clone)]
pub struct AcquirerConfig {
    pub directory: PathBuf,
    pub retries: u32,
    /// Number of entries processed at once. `1` processes them one by one.
    pub concurrent_downloads: usize,
    /// Idle timeout for connecting and for each read.
    pub timeout: Duration,
    pub style_options: StyleOptions,
    pub headers: Option<HeaderMap>,
    /// Optional proxy for every request.
    pub proxy: Option<reqwest::Proxy>,
    /// Honour the proxies declared in the environment.
    pub use_system_proxy: bool,
    pub on_complete: Option<Arc<OutcomeCallback>>,
}

impl AcquirerConfig {
    /// The HTTP settings derived from this configuration.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            retries: self.retries,
            timeout: self.timeout,
            proxy: self.proxy.clone(),
            use_system_proxy: self.use_system_proxy,
            headers: self.headers.clone(),
            ..HttpClientConfig::default()
        }
    }
}

impl std::fmt::Debug for AcquirerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquirerConfig")
            .field("directory", &self.directory)
            .field("retries", &self.retries)
            .field("concurrent_downloads", &self.concurrent_downloads)
            .field("timeout", &self.timeout)
            .field("style_options", &self.style_options)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy.is_some())
            .field("use_system_proxy", &self.use_system_proxy)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for AcquirerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            retries: DEFAULT_RETRIES,
            concurrent_downloads: 1,
            timeout: DEFAULT_TIMEOUT,
            style_options: StyleOptions::default(),
            headers: None,
            proxy: None,
            use_system_proxy: true,
            on_complete: None,
        }
    }
}

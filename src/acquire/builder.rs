//! Builder for [`Acquirer`] instances.
//!
//! # Examples
//!
//! ```rust
//! use mcprov::acquire::{AcquirerBuilder, Status};
//! use std::time::Duration;
//!
//! let acquirer = AcquirerBuilder::new()
//!     .directory("server/mods".into())
//!     .concurrent_downloads(4)
//!     .timeout(Duration::from_secs(60))
//!     .on_complete(|outcome| {
//!         if let Status::Fail(msg) = outcome.status() {
//!             eprintln!("{} failed: {}", outcome.entry().slug(), msg);
//!         }
//!     })
//!     .build();
//! ```

use super::{acquirer::Acquirer, config::AcquirerConfig, outcome::ModOutcome};
use crate::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc, time::Duration};

#[derive(Default)]
pub struct AcquirerBuilder {
    config: AcquirerConfig,
}

impl AcquirerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose acquirer draws no progress bars.
    pub fn hidden() -> Self {
        Self::new().style_options(StyleOptions::hidden())
    }

    /// Where mod files are written. Created on demand.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Retries per HTTP request, on top of the first attempt.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Entries in flight at once. Outcomes keep the declared order whatever
    /// the value, and zero is read as one.
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.config.concurrent_downloads = concurrent_downloads.max(1);
        self
    }

    /// Longest silence tolerated while connecting or reading. Slow transfers
    /// that keep making progress are not cut off.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Ignore the proxies declared in the environment.
    pub fn use_system_proxy(mut self, enabled: bool) -> Self {
        self.config.use_system_proxy = enabled;
        self
    }

    /// Called once per entry as soon as it settles, successful or not.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ModOutcome) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.config.headers.get_or_insert_with(HeaderMap::new)
    }

    /// Headers sent with every request. Repeated calls merge.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers_mut().extend(headers);
        self
    }

    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers_mut().insert(name, value);
        self
    }

    pub fn build(self) -> Acquirer {
        Acquirer::new(self.config)
    }
}

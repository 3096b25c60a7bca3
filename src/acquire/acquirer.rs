//! The batch acquisition engine.
//!
//! [`Acquirer`] walks the entries of a [`ModConfig`], dispatches each to the
//! [`ModSource`](crate::source::ModSource) matching its platform and records
//! one [`ModOutcome`] per entry. A failing entry never stops the batch.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcprov::acquire::AcquirerBuilder;
//! use mcprov::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("mods.json")?;
//! let acquirer = AcquirerBuilder::new()
//!     .directory("server/mods".into())
//!     .build();
//!
//! let result = acquirer.acquire(&config, None).await?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```

use super::config::AcquirerConfig;
use super::outcome::{AcquisitionResult, ModOutcome};
use super::sources::Sources;
use crate::config::{ModConfig, ModEntry, DEFAULT_VERSION};
use crate::error::{Error, Result};
use crate::http::create_http_client;
use crate::progress::ProgressDisplay;
use crate::source::{error_chain, CurseForgeClient, ModrinthClient};

use futures::stream::{self, StreamExt};
use reqwest::header::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

/// Represents the acquisition controller.
///
/// ```rust
/// use mcprov::acquire::AcquirerBuilder;
///
/// let acquirer = AcquirerBuilder::new().build();
/// assert_eq!(acquirer.concurrent_downloads(), 1);
/// ```
#[derive(Clone)]
pub struct Acquirer {
    config: AcquirerConfig,
}

impl fmt::Debug for Acquirer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acquirer")
            .field("config", &self.config)
            .finish()
    }
}

/// Build the catalogs for one run.
///
/// Modrinth is always available. CurseForge needs a `curseforge_key`; a
/// blank key leaves it out with a warning instead of failing the run.
pub fn default_sources(client: ClientWithMiddleware, curseforge_key: Option<&str>) -> Sources {
    let sources = Sources::new().with_modrinth(Arc::new(ModrinthClient::new(client.clone())));

    match curseforge_key {
        Some(key) => match CurseForgeClient::new(client, key) {
            Ok(curseforge) => sources.with_curseforge(Arc::new(curseforge)),
            Err(e) => {
                warn!("CurseForge client unavailable: {}", e);
                sources
            }
        },
        None => {
            info!("No CurseForge API key provided, CurseForge mods will be skipped");
            sources
        }
    }
}

impl Acquirer {
    pub(crate) fn new(config: AcquirerConfig) -> Self {
        Self { config }
    }

    /// Gets the directory the mods are written to.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of retries per request.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the number of entries processed at once.
    pub fn concurrent_downloads(&self) -> usize {
        self.config.concurrent_downloads
    }

    /// Gets the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Build the HTTP client this acquirer's settings describe.
    pub fn http_client(&self) -> Result<ClientWithMiddleware> {
        Ok(create_http_client(self.config.http_client_config())?)
    }

    /// Acquire every mod of `config` from the public catalogs.
    ///
    /// Only a failure to create the output directory or to build the HTTP
    /// client is returned as an error. Per-mod failures end up in the result.
    pub async fn acquire(
        &self,
        config: &ModConfig,
        curseforge_key: Option<&str>,
    ) -> Result<AcquisitionResult> {
        let client = self.http_client()?;
        let sources = default_sources(client, curseforge_key);
        self.acquire_with(config, &sources).await
    }

    /// Acquire every mod of `config` from the given `sources`.
    pub async fn acquire_with(
        &self,
        config: &ModConfig,
        sources: &Sources,
    ) -> Result<AcquisitionResult> {
        debug!("Creating output directory {:?}", &self.config.directory);
        fs::create_dir_all(&self.config.directory).await?;

        info!(
            "Acquiring {} mods for {} {}",
            config.mods().len(),
            config.mod_loader(),
            config.minecraft_version()
        );

        let progress_display =
            ProgressDisplay::new(self.config.style_options.clone(), config.mods().len());
        let locks = PathLocks::default();

        // `buffered` yields in declared order whatever the worker count.
        let outcomes = stream::iter(config.mods())
            .map(|entry| self.acquire_entry(config, entry, sources, &progress_display, &locks))
            .buffered(self.config.concurrent_downloads.max(1))
            .collect::<Vec<_>>()
            .await;

        progress_display.finish();

        let result = AcquisitionResult::from(outcomes);
        info!("{}", result);
        if !result.is_complete() {
            warn!("Failed to acquire: {}", result.failed().join(", "));
        }
        Ok(result)
    }

    /// Process one entry, turning any error into a failed outcome.
    async fn acquire_entry(
        &self,
        config: &ModConfig,
        entry: &ModEntry,
        sources: &Sources,
        progress_display: &ProgressDisplay,
        locks: &PathLocks,
    ) -> ModOutcome {
        progress_display.set_current(entry.slug());

        let outcome = ModOutcome::new(entry.clone());
        let outcome = match self
            .fetch_entry(config, entry, sources, progress_display, locks)
            .await
        {
            Ok((path, size)) => outcome.success(path, size),
            Err(e) => {
                warn!("Error acquiring '{}': {}", entry.slug(), error_chain(&e));
                outcome.fail(&e)
            }
        };

        progress_display.entry_done();

        if let Some(ref callback) = self.config.on_complete {
            callback(&outcome);
        }

        outcome
    }

    async fn fetch_entry(
        &self,
        config: &ModConfig,
        entry: &ModEntry,
        sources: &Sources,
        progress_display: &ProgressDisplay,
        locks: &PathLocks,
    ) -> Result<(PathBuf, u64)> {
        let source = sources
            .get(entry.platform())
            .ok_or(Error::SourceUnavailable {
                platform: entry.platform(),
            })?;

        if entry.version() != DEFAULT_VERSION {
            debug!(
                "Version constraint '{}' for '{}' is ignored, using the newest compatible file",
                entry.version(),
                entry.slug()
            );
        }

        info!("Searching for '{}' on {}", entry.slug(), entry.platform());
        let artifact = source
            .resolve(
                entry.slug(),
                config.minecraft_version(),
                config.mod_loader(),
            )
            .await?;

        let destination = artifact.destination(&self.config.directory);
        let lock = locks.get(&destination)?;
        let _guard = lock.lock().await;

        info!(
            "Downloading {} from {}",
            artifact.filename,
            entry.platform()
        );
        let pb = progress_display.transfer_bar(0, artifact.filename.clone());
        let fetched = source.fetch(&artifact, &self.config.directory, &pb).await;
        progress_display.finish_transfer(pb);

        let path = fetched?;
        let size = fs::metadata(&path).await?.len();
        debug!("Wrote {} bytes to {:?}", size, &path);
        Ok((path, size))
    }
}

/// One async lock per destination path.
///
/// Two entries resolving to the same file name take turns, the later one
/// overwriting the earlier.
#[derive(Default)]
struct PathLocks {
    inner: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl PathLocks {
    fn get(&self, path: &Path) -> Result<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self
            .inner
            .lock()
            .map_err(|_| Error::Internal("destination lock table poisoned".into()))?;
        Ok(locks.entry(path.to_path_buf()).or_default().clone())
    }
}

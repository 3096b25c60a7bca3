//! Mod catalogs.
//!
//! Each catalog implements [`ModSource`]: resolve a slug to the best
//! compatible [`ArtifactDescriptor`], then fetch that artifact into a
//! directory. The acquisition engine picks the source for an entry by its
//! [`Platform`] tag, never by inspecting the source's concrete type.
//!
//! - [`modrinth`] - the Modrinth v2 API, no authentication
//! - [`curseforge`] - the CurseForge v1 API, API key required

pub mod curseforge;
pub mod modrinth;

pub use curseforge::CurseForgeClient;
pub use modrinth::ModrinthClient;

use crate::config::{ModLoader, Platform};
use crate::error::{Error, Result};
use crate::transfer::stream_download;

use async_trait::async_trait;
use indicatif::ProgressBar;
use reqwest::StatusCode;
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A concrete downloadable file chosen by a [`ModSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    /// Catalog the artifact comes from.
    pub platform: Platform,
    /// Slug the artifact was resolved from.
    pub slug: String,
    /// Identifier of the owning project on its platform.
    pub project_id: String,
    /// Identifier of the file (Modrinth version id, CurseForge file id).
    pub file_id: String,
    /// File name announced by the catalog.
    pub filename: String,
    /// Where the bytes are served from.
    pub url: String,
    /// Compatibility tags declared for game versions.
    pub game_versions: Vec<String>,
    /// Compatibility tags declared for loaders.
    pub loaders: Vec<String>,
    /// Publication date, used to order candidates.
    pub published: String,
}

impl ArtifactDescriptor {
    /// Local path of this artifact inside `output_dir`.
    ///
    /// Only the last component of the announced file name is kept, and
    /// `{slug}.jar` is used when there is none.
    pub fn destination(&self, output_dir: &Path) -> PathBuf {
        match Path::new(&self.filename).file_name() {
            Some(name) => output_dir.join(name),
            None => output_dir.join(format!("{}.jar", self.slug)),
        }
    }
}

/// A catalog mods can be resolved against and fetched from.
#[async_trait]
pub trait ModSource: Send + Sync {
    /// Platform tag this source serves.
    fn platform(&self) -> Platform;

    /// Find the best artifact for `slug` compatible with `game_version` and `loader`.
    async fn resolve(
        &self,
        slug: &str,
        game_version: &str,
        loader: ModLoader,
    ) -> Result<ArtifactDescriptor>;

    /// Download `artifact` into `output_dir` and return the local path.
    async fn fetch(
        &self,
        artifact: &ArtifactDescriptor,
        output_dir: &Path,
        progress: &ProgressBar,
    ) -> Result<PathBuf>;

    /// Resolve then fetch, logging instead of returning the failure.
    ///
    /// `None` means the mod was not found or a transfer failed; the log line
    /// says which.
    async fn download_mod(
        &self,
        slug: &str,
        game_version: &str,
        loader: ModLoader,
        output_dir: &Path,
        progress: &ProgressBar,
    ) -> Option<PathBuf> {
        info!("Searching for '{}' on {}", slug, self.platform());
        let artifact = match self.resolve(slug, game_version, loader).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("{}", error_chain(&e));
                return None;
            }
        };

        info!("Downloading {} from {}", artifact.filename, self.platform());
        match self.fetch(&artifact, output_dir, progress).await {
            Ok(path) => {
                info!("Successfully downloaded {}", artifact.filename);
                Some(path)
            }
            Err(e) => {
                warn!("Error downloading '{}': {}", slug, error_chain(&e));
                None
            }
        }
    }
}

/// Send `request` and decode its JSON body.
///
/// A `404` becomes [`Error::NotFound`] for `slug`; any other failure is an
/// [`Error::Transport`] described by `what`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    slug: &str,
    what: &str,
) -> Result<T> {
    let res = request
        .send()
        .await
        .map_err(|e| Error::transport(format!("Error requesting {} for '{}'", what, slug), e))?;

    if res.status() == StatusCode::NOT_FOUND {
        return Err(Error::not_found(slug, format!("{} does not exist", what)));
    }

    let res = res
        .error_for_status()
        .map_err(|e| Error::transport(format!("Error requesting {} for '{}'", what, slug), e))?;

    res.json::<T>()
        .await
        .map_err(|e| Error::transport(format!("Invalid {} response for '{}'", what, slug), e))
}

/// Fetch step shared by both catalogs.
pub(crate) async fn fetch_artifact(
    client: &ClientWithMiddleware,
    artifact: &ArtifactDescriptor,
    output_dir: &Path,
    progress: &ProgressBar,
) -> Result<PathBuf> {
    let destination = artifact.destination(output_dir);
    stream_download(client, &artifact.url, &destination, progress).await?;
    Ok(destination)
}

/// Render an error together with its sources on one line.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

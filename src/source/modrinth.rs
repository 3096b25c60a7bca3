//! Modrinth catalog client.
//!
//! Resolution follows the catalog's own ordering: the version list is
//! filtered server-side by exact game version and loader, and the first
//! entry returned is taken as the best match. No client-side re-sorting
//! happens.

use super::{fetch_artifact, get_json, ArtifactDescriptor, ModSource};
use crate::config::{ModLoader, Platform};
use crate::error::{Error, Result};

use async_trait::async_trait;
use indicatif::ProgressBar;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base URL of the public Modrinth API.
pub const MODRINTH_API: &str = "https://api.modrinth.com/v2";

/// A Modrinth project.
#[derive(Deserialize, Debug, Clone)]
pub struct Project {
    /// The ID of the project
    pub id: String,
    #[serde(default)]
    pub slug: String,
    /// The display name of the project
    #[serde(default)]
    pub title: String,
}

/// A Modrinth project version.
#[derive(Deserialize, Debug, Clone)]
pub struct Version {
    /// The ID of this version
    pub id: String,
    /// The ID of the project this version is from
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub version_number: String,
    /// The game versions this version supports
    #[serde(default)]
    pub game_versions: Vec<String>,
    /// The loaders that this version supports
    #[serde(default)]
    pub loaders: Vec<String>,
    /// The list of downloads for this version
    #[serde(default)]
    pub files: Vec<VersionFile>,
    /// The date this version was published in ISO-8601
    #[serde(default)]
    pub date_published: String,
}

/// A file download attached to a [`Version`].
#[derive(Deserialize, Debug, Clone)]
pub struct VersionFile {
    pub url: Option<String>,
    pub filename: Option<String>,
    /// Whether or not this is the primary file for this version
    #[serde(default)]
    pub primary: bool,
}

impl Version {
    /// The file flagged primary, or the first file when none is.
    pub fn primary_file(&self) -> Option<&VersionFile> {
        self.files
            .iter()
            .find(|f| f.primary)
            .or_else(|| self.files.first())
    }
}

/// Client for the Modrinth API.
#[derive(Clone, Debug)]
pub struct ModrinthClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl ModrinthClient {
    /// Create a client for the public Modrinth API.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self {
            client,
            base_url: MODRINTH_API.to_string(),
        }
    }

    /// Point the client at another deployment of the API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/project/<slug>[/<tail>...]`, with `slug` escaped as one
    /// path segment.
    fn project_url(&self, slug: &str, tail: &[&str]) -> Result<Url> {
        let invalid = |reason: String| Error::InvalidUrl(format!("{}: {}", self.base_url, reason));
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".into()))?
            .pop_if_empty()
            .push("project")
            .push(slug)
            .extend(tail);
        Ok(url)
    }

    /// Get a project by slug.
    pub async fn get_project(&self, slug: &str) -> Result<Project> {
        let url = self.project_url(slug, &[])?;
        get_json(self.client.get(url), slug, "Modrinth project").await
    }

    /// List the versions of `slug` matching `game_version` and `loader` exactly.
    pub async fn get_versions(
        &self,
        slug: &str,
        game_version: &str,
        loader: ModLoader,
    ) -> Result<Vec<Version>> {
        let url = self.project_url(slug, &["version"])?;
        let game_versions = json_list(game_version);
        let loaders = json_list(loader.as_str());
        let request = self
            .client
            .get(url)
            .query(&[("game_versions", game_versions), ("loaders", loaders)]);
        get_json(request, slug, "Modrinth versions").await
    }
}

/// Encode a single value as the JSON array the Modrinth filters expect.
fn json_list(value: &str) -> String {
    serde_json::Value::from(vec![value]).to_string()
}

/// Turn the first version of a filtered listing into a descriptor.
pub fn select_version(
    slug: &str,
    versions: Vec<Version>,
    game_version: &str,
    loader: ModLoader,
) -> Result<ArtifactDescriptor> {
    let version = versions.into_iter().next().ok_or_else(|| {
        Error::not_found(
            slug,
            format!(
                "no compatible version found (MC {}, {})",
                game_version, loader
            ),
        )
    })?;

    let file = version
        .primary_file()
        .ok_or_else(|| Error::not_found(slug, "version has no files"))?;
    let url = file
        .url
        .clone()
        .ok_or_else(|| Error::not_found(slug, "no download URL found"))?;
    let filename = file
        .filename
        .clone()
        .unwrap_or_else(|| format!("{}.jar", slug));

    Ok(ArtifactDescriptor {
        platform: Platform::Modrinth,
        slug: slug.to_string(),
        project_id: version.project_id.clone(),
        file_id: version.id.clone(),
        filename,
        url,
        game_versions: version.game_versions.clone(),
        loaders: version.loaders.clone(),
        published: version.date_published.clone(),
    })
}

#[async_trait]
impl ModSource for ModrinthClient {
    fn platform(&self) -> Platform {
        Platform::Modrinth
    }

    async fn resolve(
        &self,
        slug: &str,
        game_version: &str,
        loader: ModLoader,
    ) -> Result<ArtifactDescriptor> {
        let project = self.get_project(slug).await?;
        debug!("Modrinth project '{}' is {} ({})", slug, project.title, project.id);

        let versions = self.get_versions(slug, game_version, loader).await?;
        let mut artifact = select_version(slug, versions, game_version, loader)?;
        if artifact.project_id.is_empty() {
            artifact.project_id = project.id;
        }
        Ok(artifact)
    }

    async fn fetch(
        &self,
        artifact: &ArtifactDescriptor,
        output_dir: &Path,
        progress: &ProgressBar,
    ) -> Result<PathBuf> {
        fetch_artifact(&self.client, artifact, output_dir, progress).await
    }
}

//! CurseForge catalog client.
//!
//! Resolution searches the Minecraft "Mods" class by slug, takes the first
//! hit, lists its files, keeps the files compatible with the requested game
//! version and loader, and picks the most recent one by `fileDate`. The
//! download URL comes from a separate per-file lookup.
//!
//! CurseForge records game versions and loader names side by side in the
//! same `gameVersions` tag list (`["1.20.1", "Forge", "Client"]`), and the
//! compatibility check reads both from that one list. A file whose loader is
//! only recorded elsewhere is therefore treated as incompatible.

use super::{fetch_artifact, get_json, ArtifactDescriptor, ModSource};
use crate::config::{ModLoader, Platform};
use crate::error::{Error, Result};

use async_trait::async_trait;
use indicatif::ProgressBar;
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base URL of the public CurseForge API.
pub const CURSEFORGE_API: &str = "https://api.curseforge.com/v1";
/// CurseForge game identifier for Minecraft.
pub const MINECRAFT_GAME_ID: u32 = 432;
/// CurseForge class identifier for Minecraft mods.
pub const MODS_CLASS_ID: u32 = 6;

const API_KEY_HEADER: &str = "x-api-key";

/// Every CurseForge response wraps its payload in `data`.
#[derive(Deserialize, Debug)]
struct Envelope<T> {
    data: T,
}

/// A CurseForge mod returned by the search endpoint.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Mod {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// A file attached to a CurseForge mod.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: u64,
    #[serde(default)]
    pub file_name: String,
    /// ISO-8601 upload date.
    #[serde(default)]
    pub file_date: String,
    /// Game versions and loader names, mixed.
    #[serde(default)]
    pub game_versions: Vec<String>,
}

/// Whether `file` declares both `game_version` and `loader` among its tags.
///
/// The game version must match exactly; the loader name is compared
/// case-insensitively. Both are looked up in `gameVersions`.
pub fn is_compatible(file: &File, game_version: &str, loader: ModLoader) -> bool {
    let has_version = file.game_versions.iter().any(|tag| tag == game_version);
    let has_loader = file
        .game_versions
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(loader.as_str()));
    has_version && has_loader
}

/// The newest compatible file, ordered by `fileDate` descending.
///
/// Dates are ISO-8601 strings, so string order is chronological order. Ties
/// keep listing order.
pub fn select_file(files: Vec<File>, game_version: &str, loader: ModLoader) -> Option<File> {
    let mut compatible: Vec<File> = files
        .into_iter()
        .filter(|f| is_compatible(f, game_version, loader))
        .collect();
    compatible.sort_by(|a, b| b.file_date.cmp(&a.file_date));
    compatible.into_iter().next()
}

/// Client for the CurseForge API.
#[derive(Clone)]
pub struct CurseForgeClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for CurseForgeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurseForgeClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl CurseForgeClient {
    /// Create a client for the public CurseForge API.
    ///
    /// Fails with [`Error::MissingCredential`] when `api_key` is blank.
    pub fn new(client: ClientWithMiddleware, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingCredential);
        }
        Ok(Self {
            client,
            base_url: CURSEFORGE_API.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Point the client at another deployment of the API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
    }

    /// Search the Minecraft mods class for `slug`.
    pub async fn search(&self, slug: &str) -> Result<Vec<Mod>> {
        let url = format!("{}/mods/search", self.base_url);
        let request = self.get(&url).query(&[
            ("gameId", MINECRAFT_GAME_ID.to_string()),
            ("slug", slug.to_string()),
            ("classId", MODS_CLASS_ID.to_string()),
        ]);
        let envelope: Envelope<Vec<Mod>> = get_json(request, slug, "CurseForge search").await?;
        Ok(envelope.data)
    }

    /// List the files of a mod.
    pub async fn files(&self, slug: &str, mod_id: u64) -> Result<Vec<File>> {
        let url = format!("{}/mods/{}/files", self.base_url, mod_id);
        let envelope: Envelope<Vec<File>> =
            get_json(self.get(&url), slug, "CurseForge files").await?;
        Ok(envelope.data)
    }

    /// Look up the download URL of one file.
    ///
    /// A `null` URL means the author disabled third-party downloads.
    pub async fn download_url(&self, slug: &str, mod_id: u64, file_id: u64) -> Result<String> {
        let url = format!(
            "{}/mods/{}/files/{}/download-url",
            self.base_url, mod_id, file_id
        );
        let envelope: Envelope<Option<String>> =
            get_json(self.get(&url), slug, "CurseForge download URL").await?;
        envelope
            .data
            .ok_or_else(|| Error::not_found(slug, "no download URL found"))
    }
}

#[async_trait]
impl ModSource for CurseForgeClient {
    fn platform(&self) -> Platform {
        Platform::CurseForge
    }

    async fn resolve(
        &self,
        slug: &str,
        game_version: &str,
        loader: ModLoader,
    ) -> Result<ArtifactDescriptor> {
        let found = self
            .search(slug)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(slug, "mod not found on CurseForge"))?;
        debug!("CurseForge mod '{}' is {} ({})", slug, found.name, found.id);

        let files = self.files(slug, found.id).await?;
        let file = select_file(files, game_version, loader).ok_or_else(|| {
            Error::not_found(
                slug,
                format!(
                    "no compatible files found (MC {}, {})",
                    game_version, loader
                ),
            )
        })?;

        let url = self.download_url(slug, found.id, file.id).await?;

        Ok(ArtifactDescriptor {
            platform: Platform::CurseForge,
            slug: slug.to_string(),
            project_id: found.id.to_string(),
            file_id: file.id.to_string(),
            filename: file.file_name,
            url,
            loaders: file
                .game_versions
                .iter()
                .filter(|tag| tag.to_ascii_lowercase().parse::<ModLoader>().is_ok())
                .cloned()
                .collect(),
            game_versions: file.game_versions,
            published: file.file_date,
        })
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

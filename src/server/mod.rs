//! Server jars and loader installers.
//!
//! Besides mods, provisioning a server needs the vanilla server jar or the
//! installer of the chosen loader. [`ServerArtifacts`] resolves where those
//! live and fetches them with the same streaming transfer used for mods.
//! Running an installer is left to the caller.
//!
//! ```rust,no_run
//! use mcprov::config::ModLoader;
//! use mcprov::http::{create_http_client, HttpClientConfig};
//! use mcprov::server::ServerArtifacts;
//! use indicatif::ProgressBar;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let artifacts = ServerArtifacts::new(client);
//! let installer = artifacts
//!     .fetch_installer(ModLoader::Forge, "1.20.1", Path::new("build"), &ProgressBar::hidden())
//!     .await?;
//! println!("installer written to {}", installer.display());
//! # Ok(())
//! # }
//! ```

pub mod forge;
pub mod vanilla;

pub use forge::{Promotions, FORGE_MAVEN_URL, FORGE_PROMOTIONS_URL};
pub use vanilla::{VersionDocument, VersionManifest, MOJANG_MANIFEST_URL};

use crate::config::ModLoader;
use crate::error::{Error, Result};
use crate::source::{get_json, ModSource};
use crate::transfer::stream_download;

use indicatif::ProgressBar;
use reqwest_middleware::ClientWithMiddleware;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Fabric's installer is independent of the game version.
pub const FABRIC_INSTALLER_URL: &str =
    "https://maven.fabricmc.net/net/fabricmc/fabric-installer/1.0.1/fabric-installer-1.0.1.jar";

/// File name of the vanilla server jar.
pub const SERVER_JAR: &str = "server.jar";

/// File name a loader installer is written under.
pub fn installer_filename(loader: ModLoader) -> &'static str {
    match loader {
        ModLoader::Forge => "forge-installer.jar",
        ModLoader::Fabric => "fabric-installer.jar",
    }
}

/// Resolves and fetches server-side artifacts.
#[derive(Debug, Clone)]
pub struct ServerArtifacts {
    client: ClientWithMiddleware,
    manifest_url: String,
    promotions_url: String,
    forge_maven_url: String,
    fabric_installer_url: String,
}

impl ServerArtifacts {
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self {
            client,
            manifest_url: MOJANG_MANIFEST_URL.to_string(),
            promotions_url: FORGE_PROMOTIONS_URL.to_string(),
            forge_maven_url: FORGE_MAVEN_URL.to_string(),
            fabric_installer_url: FABRIC_INSTALLER_URL.to_string(),
        }
    }

    pub fn with_manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }

    pub fn with_promotions_url(mut self, url: impl Into<String>) -> Self {
        self.promotions_url = url.into();
        self
    }

    pub fn with_forge_maven_url(mut self, url: impl Into<String>) -> Self {
        self.forge_maven_url = url.into();
        self
    }

    pub fn with_fabric_installer_url(mut self, url: impl Into<String>) -> Self {
        self.fabric_installer_url = url.into();
        self
    }

    /// URL of the vanilla server jar for `minecraft_version`.
    pub async fn vanilla_server_url(&self, minecraft_version: &str) -> Result<String> {
        let manifest: VersionManifest = get_json(
            self.client.get(&self.manifest_url),
            minecraft_version,
            "version manifest",
        )
        .await?;

        let entry = manifest.find(minecraft_version).ok_or_else(|| {
            Error::not_found(minecraft_version, "no such version in the Mojang manifest")
        })?;
        debug!("Version document for {} is {}", minecraft_version, entry.url);

        let document: VersionDocument = get_json(
            self.client.get(&entry.url),
            minecraft_version,
            "version document",
        )
        .await?;

        document
            .downloads
            .server
            .map(|server| server.url)
            .ok_or_else(|| Error::not_found(minecraft_version, "version has no server download"))
    }

    /// The promoted Forge build for `minecraft_version`.
    pub async fn forge_version(&self, minecraft_version: &str) -> Result<String> {
        let promotions: Promotions = get_json(
            self.client.get(&self.promotions_url),
            minecraft_version,
            "Forge promotions",
        )
        .await?;

        promotions
            .forge_version(minecraft_version)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::not_found(
                    minecraft_version,
                    format!("no Forge version found for Minecraft {}", minecraft_version),
                )
            })
    }

    /// URL of the Forge installer for `minecraft_version`.
    pub async fn forge_installer_url(&self, minecraft_version: &str) -> Result<String> {
        let forge_version = self.forge_version(minecraft_version).await?;
        info!(
            "Using Forge {} for Minecraft {}",
            forge_version, minecraft_version
        );
        Ok(forge::installer_url(
            &self.forge_maven_url,
            minecraft_version,
            &forge_version,
        ))
    }

    pub fn fabric_installer_url(&self) -> &str {
        &self.fabric_installer_url
    }

    /// URL of the installer of `loader` for `minecraft_version`.
    pub async fn installer_url(&self, loader: ModLoader, minecraft_version: &str) -> Result<String> {
        match loader {
            ModLoader::Forge => self.forge_installer_url(minecraft_version).await,
            ModLoader::Fabric => Ok(self.fabric_installer_url.clone()),
        }
    }

    /// Download the vanilla server jar into `dest_dir` as `server.jar`.
    pub async fn fetch_server_jar(
        &self,
        minecraft_version: &str,
        dest_dir: &Path,
        progress: &ProgressBar,
    ) -> Result<PathBuf> {
        let url = self.vanilla_server_url(minecraft_version).await?;
        self.fetch_to(&url, dest_dir, SERVER_JAR, progress).await
    }

    /// Download the installer of `loader` into `dest_dir`.
    pub async fn fetch_installer(
        &self,
        loader: ModLoader,
        minecraft_version: &str,
        dest_dir: &Path,
        progress: &ProgressBar,
    ) -> Result<PathBuf> {
        let url = self.installer_url(loader, minecraft_version).await?;
        self.fetch_to(&url, dest_dir, installer_filename(loader), progress)
            .await
    }

    async fn fetch_to(
        &self,
        url: &str,
        dest_dir: &Path,
        filename: &str,
        progress: &ProgressBar,
    ) -> Result<PathBuf> {
        fs::create_dir_all(dest_dir).await?;
        let destination = dest_dir.join(filename);
        info!("Downloading {} from {}", filename, url);
        let size = stream_download(&self.client, url, &destination, progress).await?;
        debug!("Wrote {} bytes to {:?}", size, &destination);
        Ok(destination)
    }
}

/// Fetch Fabric API into `mods_dir`, which every Fabric server needs.
///
/// A failure is logged and reported as `None`.
pub async fn fetch_fabric_api(
    source: &dyn ModSource,
    minecraft_version: &str,
    mods_dir: &Path,
    progress: &ProgressBar,
) -> Option<PathBuf> {
    if let Err(e) = fs::create_dir_all(mods_dir).await {
        warn!("Cannot create {:?}: {}", mods_dir, e);
        return None;
    }
    let path = source
        .download_mod(
            "fabric-api",
            minecraft_version,
            ModLoader::Fabric,
            mods_dir,
            progress,
        )
        .await;
    if path.is_none() {
        warn!("Fabric API could not be downloaded, add it to the mods manually");
    }
    path
}

//! Mojang version manifest.

use serde::Deserialize;

/// Where Mojang lists every released game version.
pub const MOJANG_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

#[derive(Deserialize, Debug, Clone)]
pub struct VersionManifest {
    #[serde(default)]
    pub versions: Vec<ManifestEntry>,
}

/// One game version and the URL of its version document.
#[derive(Deserialize, Debug, Clone)]
pub struct ManifestEntry {
    pub id: String,
    pub url: String,
}

impl VersionManifest {
    pub fn find(&self, minecraft_version: &str) -> Option<&ManifestEntry> {
        self.versions.iter().find(|v| v.id == minecraft_version)
    }
}

/// The part of a version document naming its downloads.
#[derive(Deserialize, Debug, Clone)]
pub struct VersionDocument {
    #[serde(default)]
    pub downloads: Downloads,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Downloads {
    /// Absent for versions that never shipped a dedicated server.
    pub server: Option<DownloadInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DownloadInfo {
    pub url: String,
}

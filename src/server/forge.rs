//! Forge promotions and installer coordinates.

use serde::Deserialize;
use std::collections::HashMap;

/// Forge's map of promoted builds per game version.
pub const FORGE_PROMOTIONS_URL: &str =
    "https://files.minecraftforge.net/net/minecraftforge/forge/promotions_slim.json";
/// Maven repository hosting Forge installers.
pub const FORGE_MAVEN_URL: &str = "https://maven.minecraftforge.net";

/// `promotions_slim.json`, keyed `"<mc>-recommended"` and `"<mc>-latest"`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Promotions {
    #[serde(default)]
    pub promos: HashMap<String, String>,
}

impl Promotions {
    /// The recommended Forge build for `minecraft_version`, else the latest one.
    pub fn forge_version(&self, minecraft_version: &str) -> Option<&str> {
        self.promos
            .get(&format!("{}-recommended", minecraft_version))
            .or_else(|| self.promos.get(&format!("{}-latest", minecraft_version)))
            .map(String::as_str)
    }
}

/// Installer URL of Forge `forge_version` for `minecraft_version` under `maven`.
pub fn installer_url(maven: &str, minecraft_version: &str, forge_version: &str) -> String {
    let full = format!("{}-{}", minecraft_version, forge_version);
    format!(
        "{}/net/minecraftforge/forge/{full}/forge-{full}-installer.jar",
        maven.trim_end_matches('/')
    )
}

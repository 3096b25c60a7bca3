//! Typed mod configuration.
//!
//! Values of these types are only produced by the parser in
//! [`super::parse`], so every [`ModConfig`] in circulation already satisfies
//! its invariants: the loader and platforms are members of their closed
//! enums, the Minecraft version is non-empty and every slug is non-empty.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The version constraint assumed when a mod entry does not declare one.
pub const DEFAULT_VERSION: &str = "latest";

/// Mod loader the server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModLoader {
    Forge,
    Fabric,
}

impl ModLoader {
    /// The lowercase name used in documents and remote queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModLoader::Forge => "forge",
            ModLoader::Fabric => "fabric",
        }
    }
}

impl fmt::Display for ModLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModLoader {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forge" => Ok(ModLoader::Forge),
            "fabric" => Ok(ModLoader::Fabric),
            other => Err(other.to_string()),
        }
    }
}

/// Catalog a mod is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Modrinth,
    #[serde(rename = "curseforge")]
    CurseForge,
}

impl Platform {
    /// The lowercase name used in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Modrinth => "modrinth",
            Platform::CurseForge => "curseforge",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Modrinth => f.write_str("Modrinth"),
            Platform::CurseForge => f.write_str("CurseForge"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modrinth" => Ok(Platform::Modrinth),
            "curseforge" => Ok(Platform::CurseForge),
            other => Err(other.to_string()),
        }
    }
}

/// A single mod to download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModEntry {
    platform: Platform,
    slug: String,
    version: String,
}

impl ModEntry {
    pub(crate) fn new(platform: Platform, slug: String, version: String) -> Self {
        Self {
            platform,
            slug,
            version,
        }
    }

    /// Catalog this mod comes from.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Identifier of the mod on its platform.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Declared version constraint, `"latest"` unless the document says otherwise.
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// A validated mod list for one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModConfig {
    mod_loader: ModLoader,
    minecraft_version: String,
    mods: Vec<ModEntry>,
}

impl ModConfig {
    pub(crate) fn new(mod_loader: ModLoader, minecraft_version: String, mods: Vec<ModEntry>) -> Self {
        Self {
            mod_loader,
            minecraft_version,
            mods,
        }
    }

    pub fn mod_loader(&self) -> ModLoader {
        self.mod_loader
    }

    pub fn minecraft_version(&self) -> &str {
        &self.minecraft_version
    }

    /// The mods in declared order.
    pub fn mods(&self) -> &[ModEntry] {
        &self.mods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_round_trips_through_str() {
        assert_eq!("forge".parse::<ModLoader>(), Ok(ModLoader::Forge));
        assert_eq!("fabric".parse::<ModLoader>(), Ok(ModLoader::Fabric));
        assert_eq!(ModLoader::Fabric.to_string(), "fabric");
    }

    #[test]
    fn test_loader_names_are_case_sensitive() {
        assert_eq!("Forge".parse::<ModLoader>(), Err("Forge".to_string()));
        assert!("quilt".parse::<ModLoader>().is_err());
    }

    #[test]
    fn test_platform_parse_and_display() {
        assert_eq!("curseforge".parse::<Platform>(), Ok(Platform::CurseForge));
        assert_eq!(Platform::CurseForge.as_str(), "curseforge");
        assert_eq!(Platform::CurseForge.to_string(), "CurseForge");
        assert!("github".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_serializes_lowercase() {
        let json = serde_json::to_string(&Platform::CurseForge).unwrap();
        assert_eq!(json, "\"curseforge\"");
    }
}

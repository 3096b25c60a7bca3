//! Parsing and validation of mod configuration documents.
//!
//! Validation runs in a fixed order and stops at the first problem:
//!
//! 1. the required top-level keys `mod_loader`, `minecraft_version`, `mods`;
//! 2. each mod entry in order (structure first, then platform and slug);
//! 3. the mod loader and Minecraft version values.
//!
//! A single bad entry rejects the whole document. Nothing is silently dropped.

use super::model::{ModConfig, ModEntry, ModLoader, Platform, DEFAULT_VERSION};
use crate::error::ConfigError;

use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

const REQUIRED_FIELDS: [&str; 3] = ["mod_loader", "minecraft_version", "mods"];

/// Validate a structured document and turn it into a [`ModConfig`].
pub fn parse(document: &Value) -> Result<ModConfig, ConfigError> {
    let root = document.as_object().ok_or(ConfigError::InvalidField {
        field: "document",
        reason: "expected an object".into(),
    })?;

    for field in REQUIRED_FIELDS {
        if !root.contains_key(field) {
            return Err(ConfigError::MissingField(field));
        }
    }

    let raw_mods = root["mods"].as_array().ok_or(ConfigError::InvalidField {
        field: "mods",
        reason: "expected an array".into(),
    })?;

    let mods = raw_mods
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_entry(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mod_loader = match &root["mod_loader"] {
        Value::String(s) => s
            .parse::<ModLoader>()
            .map_err(ConfigError::InvalidModLoader)?,
        other => return Err(ConfigError::InvalidModLoader(other.to_string())),
    };

    let minecraft_version = match &root["minecraft_version"] {
        Value::String(s) if s.is_empty() => return Err(ConfigError::EmptyMinecraftVersion),
        Value::String(s) => s.clone(),
        other => {
            return Err(ConfigError::InvalidField {
                field: "minecraft_version",
                reason: format!("expected a string, found {}", other),
            })
        }
    };

    Ok(ModConfig::new(mod_loader, minecraft_version, mods))
}

fn parse_entry(index: usize, raw: &Value) -> Result<ModEntry, ConfigError> {
    let fields: &Map<String, Value> = raw.as_object().ok_or(ConfigError::InvalidEntry {
        index,
        reason: "must be an object".into(),
    })?;

    let platform = fields.get("platform").ok_or(ConfigError::InvalidEntry {
        index,
        reason: "missing 'platform' field".into(),
    })?;
    let slug = fields.get("slug").ok_or(ConfigError::InvalidEntry {
        index,
        reason: "missing 'slug' field".into(),
    })?;

    let platform = platform
        .as_str()
        .and_then(|p| p.parse::<Platform>().ok())
        .ok_or_else(|| ConfigError::InvalidPlatform {
            index,
            value: platform.to_string(),
        })?;

    let slug = slug.as_str().ok_or(ConfigError::InvalidEntry {
        index,
        reason: "'slug' must be a string".into(),
    })?;
    if slug.is_empty() {
        return Err(ConfigError::EmptySlug { index });
    }

    let version = match fields.get("version") {
        None | Some(Value::Null) => DEFAULT_VERSION.to_string(),
        Some(Value::String(v)) => v.clone(),
        Some(_) => {
            return Err(ConfigError::InvalidEntry {
                index,
                reason: "'version' must be a string".into(),
            })
        }
    };

    Ok(ModEntry::new(platform, slug.to_string(), version))
}

/// Parse a JSON document held in memory.
pub fn parse_str(text: &str) -> Result<ModConfig, ConfigError> {
    let document: Value = serde_json::from_str(text).map_err(|e| ConfigError::Malformed {
        reason: e.to_string(),
        line: e.line(),
        column: e.column(),
    })?;
    parse(&document)
}

/// Read and validate a JSON mod configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<ModConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading mod configuration from {:?}", path);
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text)
}

//! Example documents for scaffolding a new mod configuration.

use super::model::{ModConfig, ModEntry, ModLoader, Platform, DEFAULT_VERSION};
use crate::error::ConfigError;

use serde_json::Value;
use std::path::Path;
use tracing::info;

fn example_slugs(loader: ModLoader) -> &'static [&'static str] {
    match loader {
        ModLoader::Fabric => &["fabric-api", "sodium"],
        ModLoader::Forge => &["jei"],
    }
}

/// Build a minimal valid configuration for `loader`.
pub fn example_config(loader: ModLoader, minecraft_version: &str) -> ModConfig {
    let mods = example_slugs(loader)
        .iter()
        .map(|slug| ModEntry::new(Platform::Modrinth, slug.to_string(), DEFAULT_VERSION.into()))
        .collect();
    ModConfig::new(loader, minecraft_version.to_string(), mods)
}

/// Render a minimal valid document for `loader`.
///
/// The result parses back into the configuration returned by
/// [`example_config`].
pub fn render_example(loader: ModLoader, minecraft_version: &str) -> Value {
    let config = example_config(loader, minecraft_version);
    // ModConfig only holds strings and unit enums, which always serialize.
    serde_json::to_value(&config).unwrap_or(Value::Null)
}

/// Write an example document to `path` as pretty-printed JSON.
pub fn write_example(
    path: impl AsRef<Path>,
    loader: ModLoader,
    minecraft_version: &str,
) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let document = render_example(loader, minecraft_version);
    let mut text = serde_json::to_string_pretty(&document).map_err(|e| ConfigError::Malformed {
        reason: e.to_string(),
        line: 0,
        column: 0,
    })?;
    text.push('\n');
    std::fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Example configuration created: {}", path.display());
    Ok(())
}

//! Mod configuration documents.
//!
//! A document is a JSON object of the form:
//!
//! ```json
//! {
//!   "mod_loader": "fabric",
//!   "minecraft_version": "1.21.1",
//!   "mods": [
//!     {"platform": "modrinth", "slug": "fabric-api"},
//!     {"platform": "curseforge", "slug": "jei", "version": "latest"}
//!   ]
//! }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use mcprov::config::{parse_str, ModLoader, Platform};
//!
//! let config = parse_str(r#"{
//!     "mod_loader": "fabric",
//!     "minecraft_version": "1.21.1",
//!     "mods": [{"platform": "modrinth", "slug": "sodium"}]
//! }"#)?;
//!
//! assert_eq!(config.mod_loader(), ModLoader::Fabric);
//! assert_eq!(config.mods()[0].platform(), Platform::Modrinth);
//! assert_eq!(config.mods()[0].version(), "latest");
//! # Ok::<(), mcprov::ConfigError>(())
//! ```

pub mod example;
pub mod model;
pub mod parse;

pub use example::{example_config, render_example, write_example};
pub use model::{ModConfig, ModEntry, ModLoader, Platform, DEFAULT_VERSION};
pub use parse::{load_config, parse, parse_str};

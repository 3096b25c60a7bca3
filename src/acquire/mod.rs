//! Batch acquisition of the mods listed in a [`ModConfig`].
//!
//! - `acquirer` - The [`Acquirer`] and its per-entry processing
//! - `builder` - [`AcquirerBuilder`] for configuring an acquirer
//! - `config` - Configuration structures and callback types
//! - `outcome` - Per-entry [`ModOutcome`] and the run [`AcquisitionResult`]
//! - `sources` - The catalogs available to a run
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcprov::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("mods.json")?;
//! let result = mcprov::acquire::acquire(&config, "server/mods", None).await?;
//! for slug in result.failed() {
//!     eprintln!("could not acquire {}", slug);
//! }
//! # Ok(())
//! # }
//! ```

pub mod acquirer;
pub mod builder;
pub mod config;
pub mod outcome;
pub mod sources;

pub use acquirer::{default_sources, Acquirer};
pub use builder::AcquirerBuilder;
pub use config::{AcquirerConfig, OutcomeCallback};
pub use outcome::{AcquisitionResult, ModOutcome, Status};
pub use sources::Sources;

use crate::config::ModConfig;
use crate::error::Result;

use std::path::Path;

/// Acquire every mod of `config` into `output_dir` with default settings.
///
/// CurseForge entries are only attempted when `curseforge_key` is given.
pub async fn acquire(
    config: &ModConfig,
    output_dir: impl AsRef<Path>,
    curseforge_key: Option<&str>,
) -> Result<AcquisitionResult> {
    AcquirerBuilder::new()
        .directory(output_dir.as_ref().to_path_buf())
        .build()
        .acquire(config, curseforge_key)
        .await
}

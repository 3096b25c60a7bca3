//! mcprov resolves the mods a Minecraft server needs and downloads them from
//! Modrinth and CurseForge.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mcprov::{acquire::AcquirerBuilder, config::load_config, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let config = load_config("mods.json")?;
//! let acquirer = AcquirerBuilder::new()
//!     .directory("server/mods".into())
//!     .build();
//! let result = acquirer.acquire(&config, None).await?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`config`] - Mod documents: parsing, validation and example scaffolding
//! - [`source`] - The `ModSource` capability and the Modrinth and CurseForge clients
//! - [`acquire`] - The batch engine turning a configuration into files on disk
//! - [`transfer`] - Streaming download with progress reporting
//! - [`server`] - Vanilla server jars and loader installers
//! - [`error`] - Centralized error handling
//! - [`http`] - HTTP client construction
//! - [`progress`] - Progress bar styling and display management

pub mod acquire;
pub mod config;
pub mod error;
pub mod http;
pub mod progress;
pub mod server;
pub mod source;
pub mod transfer;

pub use acquire::{acquire, AcquirerBuilder, AcquisitionResult, ModOutcome, Status};
pub use config::{load_config, parse, ModConfig, ModEntry, ModLoader, Platform};
pub use error::{ConfigError, Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use source::{ArtifactDescriptor, ModSource};
pub use transfer::stream_download;

//! Error handling for mcprov.
//!
//! Two error types live here. [`ConfigError`] covers everything that can go
//! wrong while reading and validating a mod document; it is fatal to the parse
//! call and no partial configuration is ever returned alongside it. [`Error`]
//! covers resolution and transfer failures. The acquisition engine downgrades
//! every per-mod [`Error`] to a failed entry in the run result, so only
//! batch-level setup problems ever reach the caller as an `Err`.

use crate::config::Platform;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a mod configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document could not be read from disk.
    #[error("Cannot read configuration file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not syntactically valid.
    ///
    /// `line` and `column` are 1-based and are zero when the parser could not
    /// locate the problem.
    #[error("Malformed configuration document at line {line}, column {column}: {reason}")]
    Malformed {
        reason: String,
        line: usize,
        column: usize,
    },

    /// A required top-level key is absent.
    #[error("Missing required field: '{0}'")]
    MissingField(&'static str),

    /// A top-level key is present but holds the wrong kind of value.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A mod entry is structurally invalid.
    #[error("Invalid mod entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// A mod entry names a platform outside the supported set.
    #[error("Invalid mod entry at index {index}: invalid platform {value}. Must be 'modrinth' or 'curseforge'")]
    InvalidPlatform { index: usize, value: String },

    /// A mod entry has an empty slug.
    #[error("Invalid mod entry at index {index}: mod slug cannot be empty")]
    EmptySlug { index: usize },

    /// The mod loader is outside the supported set.
    #[error("Invalid mod loader: {0}. Must be 'forge' or 'fabric'")]
    InvalidModLoader(String),

    /// The Minecraft version is empty.
    #[error("Minecraft version cannot be empty")]
    EmptyMinecraftVersion,
}

/// Errors that can happen while resolving or fetching artifacts.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration document was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No client is available for the requested platform.
    #[error("No {platform} client available")]
    SourceUnavailable { platform: Platform },

    /// The CurseForge client was constructed without an API key.
    #[error("CurseForge API key is required")]
    MissingCredential,

    /// The backend answered, but holds no compatible artifact.
    #[error("'{slug}' not found: {reason}")]
    NotFound { slug: String, reason: String },

    /// A network or HTTP failure.
    #[error("{context}")]
    Transport {
        context: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library, raised while building a client.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Internal state became unusable.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap a transport failure with a short description of what was attempted.
    pub fn transport(
        context: impl Into<String>,
        source: impl Into<reqwest_middleware::Error>,
    ) -> Self {
        Error::Transport {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(slug: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::NotFound {
            slug: slug.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for operations that can fail with an mcprov [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

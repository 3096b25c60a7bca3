//! Per-mod outcomes and the run result.
//!
//! # Examples
//!
//! ```rust
//! use mcprov::acquire::{AcquisitionResult, Status};
//!
//! # fn report(result: &AcquisitionResult) {
//! for outcome in result.outcomes() {
//!     match outcome.status() {
//!         Status::Success => println!("{} -> {:?}", outcome.entry().slug(), outcome.path()),
//!         Status::NotFound(why) => println!("{}: {}", outcome.entry().slug(), why),
//!         other => println!("{}: {:?}", outcome.entry().slug(), other),
//!     }
//! }
//! println!("{}", result);
//! # }
//! ```

use crate::config::ModEntry;
use crate::error::Error;
use crate::source::error_chain;

use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome status of one mod entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The entry has not been processed yet
    NotStarted,
    /// The artifact was written to disk
    Success,
    /// No client exists for the entry's platform
    Unavailable(String),
    /// The catalog holds no compatible artifact
    NotFound(String),
    /// A network, HTTP or disk failure
    Fail(String),
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }

    /// Whether the entry ended in any of the failure states.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Status::Unavailable(_) | Status::NotFound(_) | Status::Fail(_)
        )
    }
}

impl From<&Error> for Status {
    fn from(error: &Error) -> Self {
        match error {
            Error::SourceUnavailable { .. } | Error::MissingCredential => {
                Status::Unavailable(error.to_string())
            }
            Error::NotFound { .. } => Status::NotFound(error.to_string()),
            other => Status::Fail(error_chain(other)),
        }
    }
}

/// What happened to one [`ModEntry`].
#[derive(Debug, Clone)]
pub struct ModOutcome {
    entry: ModEntry,
    status: Status,
    path: Option<PathBuf>,
    size: u64,
}

impl ModOutcome {
    /// A fresh outcome for `entry`.
    pub fn new(entry: ModEntry) -> Self {
        Self {
            entry,
            status: Status::NotStarted,
            path: None,
            size: 0,
        }
    }

    /// Mark the entry as written to `path`.
    pub fn success(self, path: PathBuf, size: u64) -> Self {
        Self {
            status: Status::Success,
            path: Some(path),
            size,
            ..self
        }
    }

    /// Mark the entry as failed with `error`.
    pub fn fail(self, error: &Error) -> Self {
        Self {
            status: Status::from(error),
            ..self
        }
    }

    pub fn entry(&self) -> &ModEntry {
        &self.entry
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Local path of the artifact, set on success.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Bytes on disk, zero unless successful.
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Result of one acquisition run.
///
/// Successful paths and failed slugs are each kept in declared order.
#[derive(Debug, Clone, Default)]
pub struct AcquisitionResult {
    downloaded: Vec<PathBuf>,
    failed: Vec<String>,
    outcomes: Vec<ModOutcome>,
}

impl From<Vec<ModOutcome>> for AcquisitionResult {
    fn from(outcomes: Vec<ModOutcome>) -> Self {
        let mut downloaded = Vec::new();
        let mut failed = Vec::new();
        for outcome in &outcomes {
            match outcome.path() {
                Some(path) if outcome.status().is_success() => downloaded.push(path.to_path_buf()),
                _ => failed.push(outcome.entry().slug().to_string()),
            }
        }
        Self {
            downloaded,
            failed,
            outcomes,
        }
    }
}

impl AcquisitionResult {
    /// Local paths of the mods written to disk.
    pub fn downloaded(&self) -> &[PathBuf] {
        &self.downloaded
    }

    /// Slugs of the mods that could not be acquired.
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// Per-entry detail.
    pub fn outcomes(&self) -> &[ModOutcome] {
        &self.outcomes
    }

    /// `true` when no entry failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

impl fmt::Display for AcquisitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Downloaded {}/{} mods",
            self.downloaded.len(),
            self.total()
        )?;
        if !self.failed.is_empty() {
            write!(
                f,
                "; {} failed: {}",
                self.failed.len(),
                self.failed.join(", ")
            )?;
        }
        Ok(())
    }
}

//! Progress bar styling.
//!
//! Two kinds of bars are styled independently: the entries bar counts the
//! mod entries of a run, the transfer bars count the bytes of one download.
//!
//! # Examples
//!
//! ```rust
//! use mcprov::progress::{ProgressBarOpts, StyleOptions};
//!
//! // Keep the entries bar, hide the per-file bars.
//! let style = StyleOptions::new(ProgressBarOpts::entries(), ProgressBarOpts::hidden());
//! assert!(style.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressStyle};

/// Styles of the entries bar and of the transfer bars.
///
/// By default the entries bar stays on screen once the run is over and the
/// transfer bars disappear as soon as their file is written.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub(crate) entries: ProgressBarOpts,
    pub(crate) transfers: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::new(ProgressBarOpts::entries(), ProgressBarOpts::transfer())
    }
}

impl StyleOptions {
    pub fn new(entries: ProgressBarOpts, transfers: ProgressBarOpts) -> Self {
        Self { entries, transfers }
    }

    /// Every bar hidden.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    pub fn set_entries(&mut self, entries: ProgressBarOpts) {
        self.entries = entries;
    }

    pub fn set_transfers(&mut self, transfers: ProgressBarOpts) {
        self.transfers = transfers;
    }

    /// `false` when no bar at all would be drawn.
    pub fn is_enabled(&self) -> bool {
        self.entries.enabled || self.transfers.enabled
    }

    pub fn entries(&self) -> &ProgressBarOpts {
        &self.entries
    }

    pub fn transfers(&self) -> &ProgressBarOpts {
        &self.transfers
    }
}

/// Look and lifetime of one progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    template: Option<String>,
    /// At least three characters: done, current, remaining.
    progress_chars: Option<String>,
    pub(crate) enabled: bool,
    /// Remove the bar from the screen once finished.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// `██████████▌          2/4 mods (50%) sodium`
    pub const TEMPLATE_ENTRIES: &'static str =
        "{bar:40.blue} {pos:>}/{len} mods ({percent}%) {msg}";
    /// `━━━━━━━━━━╾───────── 211.23 KiB/1.02 MiB 1008.31 KiB/s eta 1s sodium.jar`
    pub const TEMPLATE_TRANSFER: &'static str =
        "{bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue} {msg}";
    pub const CHARS_BLOCKS: &'static str = "█▉▊▋▌▍▎▏  ";
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Fully custom options.
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// The bar counting mod entries. It stays on screen.
    pub fn entries() -> Self {
        Self::new(
            Some(Self::TEMPLATE_ENTRIES.into()),
            Some(Self::CHARS_BLOCKS.into()),
            true,
            false,
        )
    }

    /// A byte-counting bar for one download, cleared when done.
    pub fn transfer() -> Self {
        Self::new(
            Some(Self::TEMPLATE_TRANSFER.into()),
            Some(Self::CHARS_LINE.into()),
            true,
            true,
        )
    }

    /// A bar that is never drawn.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// The indicatif style for these options.
    ///
    /// A template indicatif rejects is ignored and the default bar is used.
    pub fn to_progress_style(&self) -> ProgressStyle {
        let style = self
            .template
            .as_deref()
            .and_then(|template| ProgressStyle::with_template(template).ok())
            .unwrap_or_else(ProgressStyle::default_bar);
        match self.progress_chars.as_deref() {
            Some(chars) => style.progress_chars(chars),
            None => style,
        }
    }

    /// A bar of length `len`, or a hidden bar when disabled.
    pub fn to_progress_bar(&self, len: u64) -> ProgressBar {
        match self.enabled {
            true => ProgressBar::new(len).with_style(self.to_progress_style()),
            false => ProgressBar::hidden(),
        }
    }
}

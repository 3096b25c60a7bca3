//! On-screen progress of one acquisition run.
//!
//! [`ProgressDisplay`] draws an entries bar counting processed mod entries
//! and, under it, one transfer bar per download in flight.
//!
//! ```rust
//! use mcprov::progress::{ProgressDisplay, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::hidden(), 3);
//! let bar = display.transfer_bar(1024, "sodium-0.6.0.jar");
//! bar.inc(512);
//! display.finish_transfer(bar);
//! display.entry_done();
//! display.finish();
//! ```

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

pub struct ProgressDisplay {
    bars: MultiProgress,
    entries: ProgressBar,
    style: StyleOptions,
}

impl ProgressDisplay {
    /// `total_entries` is the length of the entries bar.
    pub fn new(style: StyleOptions, total_entries: usize) -> Self {
        let bars = match style.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };
        let entries = bars.add(style.entries().to_progress_bar(total_entries as u64));
        entries.tick();

        Self {
            bars,
            entries,
            style,
        }
    }

    /// The entries bar. indicatif bars are handles, so this is a cheap clone.
    pub fn entries_bar(&self) -> ProgressBar {
        self.entries.clone()
    }

    /// A new transfer bar. A `size` of zero means the total is not known yet.
    pub fn transfer_bar(&self, size: u64, message: impl Into<String>) -> ProgressBar {
        let bar = self.bars.add(self.style.transfers().to_progress_bar(size));
        bar.set_message(message.into());
        bar
    }

    pub fn set_current(&self, slug: &str) {
        self.entries.set_message(slug.to_string());
    }

    pub fn entry_done(&self) {
        self.entries.inc(1);
    }

    pub fn finish_transfer(&self, bar: ProgressBar) {
        finish_bar(&bar, self.style.transfers().clear);
    }

    pub fn finish(self) {
        self.entries.set_message("");
        finish_bar(&self.entries, self.style.entries().clear);
    }
}

fn finish_bar(bar: &ProgressBar, clear: bool) {
    match clear {
        true => bar.finish_and_clear(),
        false => bar.finish(),
    }
}

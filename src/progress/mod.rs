//! Progress reporting.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Coordination of the entry bar and per-transfer bars
//!
//! ```rust
//! use mcprov::acquire::AcquirerBuilder;
//! use mcprov::progress::{ProgressBarOpts, StyleOptions};
//!
//! let acquirer = AcquirerBuilder::new()
//!     .style_options(StyleOptions::new(
//!         ProgressBarOpts::entries(),
//!         ProgressBarOpts::hidden(),
//!     ))
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};

//! Terminal color theming for category-driven text UIs.
//!
//! `swatch` maps named display categories (headers, status bar, quoted
//! text, index lines, ...) to terminal styles, driven by a small
//! configuration language:
//!
//! ```text
//! color header bold red default
//! color quoted2 cyan default
//! color index underline brightred default "urgent"
//! uncolor index *
//! ```
//!
//! The engine layers styles at resolution time: a category's default, its
//! quote-depth entry, every matching regex rule in insertion order, and an
//! optional overlay parsed from SGR escape sequences embedded in the
//! content itself. The final combination is memoized and backed by a
//! bounded pool of terminal color-pair registers with reference-counted,
//! lazily-evicted slots.
//!
//! # Quick start
//!
//! ```
//! use swatch::{CategoryId, ColorEngine};
//!
//! let mut engine = ColorEngine::default();
//! engine.run_command("color header bold red default")?;
//! engine.run_command(r#"color index underline green default "urgent""#)?;
//!
//! let style = engine.resolve(CategoryId::Index, 0, Some("an urgent mail"), None);
//! let content: crossterm::style::ContentStyle = (&style).into();
//! # let _ = content;
//! # Ok::<(), swatch::ColorError>(())
//! ```
//!
//! Everything lives on one logical thread; the engine is cheap to build,
//! so tests construct one per case.

pub mod ansi;
pub mod attrs;
pub mod category;
pub mod color;
pub mod command;
mod convert;
pub mod dump;
pub mod engine;
pub mod error;
mod merge;
pub mod notify;
pub mod pairs;
pub mod quoted;
pub mod rules;
pub mod simple;
pub mod style;

pub use ansi::AnsiColor;
pub use attrs::AttrFlags;
pub use category::{CategoryId, ComposeCategory};
pub use color::Color;
pub use command::{run_command, run_config, CommandOutcome};
pub use dump::dump_config;
pub use engine::{Capabilities, ColorEngine};
pub use error::{ColorError, ErrorClass};
pub use notify::ColorEvent;
pub use quoted::QUOTE_DEPTH_MAX;
pub use style::Style;

#![forbid(unsafe_code)]
//! Localization-string interchange between Android, JSON, and Apple formats.
//!
//! Converts key → translation tables between three on-disk representations
//! without losing content across round trips:
//!
//! - **Android `strings.xml`**: one file per language, values XML-escaped
//! - **JSON**: one flat `{lang}.json` object per language
//! - **Apple `.xcstrings`**: one catalog holding every language
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use l10n_bridge::{Direction, Settings, run};
//!
//! let settings = Settings::load(".")?;
//! let report = run(Direction::JsonToCatalog, &settings)?;
//! println!("wrote {} file(s)", report.written.len());
//! # Ok::<(), l10n_bridge::Error>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod escape;
pub mod formats;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    catalog::{LanguageCatalog, Unrepresentable, build_xcstrings},
    config::{Layout, Settings},
    error::Error,
    escape::{EscapeMode, escape, unescape},
    formats::FormatType,
    pipeline::{ConversionReport, Direction, run},
    types::StringTable,
};

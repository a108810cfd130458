//! All supported localization file formats for l10n-bridge.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum for generic format handling across the crate.

pub mod android_strings;
pub mod json;
pub mod xcstrings;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
pub use json::Format as JsonFormat;
pub use xcstrings::Format as XcstringsFormat;

use crate::Error;

/// The three on-disk representations a conversion moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Android `strings.xml`, one file per language.
    AndroidStrings,
    /// Flat JSON object, one file per language.
    Json,
    /// Apple `.xcstrings`, one file for all languages.
    Xcstrings,
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::AndroidStrings => write!(f, "android"),
            FormatType::Json => write!(f, "json"),
            FormatType::Xcstrings => write!(f, "xcstrings"),
        }
    }
}

/// Accepts `android`/`xml`, `json` and `xcstrings`/`catalog`, case-insensitively.
impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" | "androidstrings" | "xml" => Ok(FormatType::AndroidStrings),
            "json" => Ok(FormatType::Json),
            "xcstrings" | "catalog" => Ok(FormatType::Xcstrings),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::AndroidStrings => "xml",
            FormatType::Json => "json",
            FormatType::Xcstrings => "xcstrings",
        }
    }

    /// Whether each language lives in its own file.
    pub fn is_per_language(&self) -> bool {
        !matches!(self, FormatType::Xcstrings)
    }
}

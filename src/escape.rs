//! Escaping rules for Android `strings.xml` values.
//!
//! Only the characters `'`, `&`, `<`, `>` and (depending on [`EscapeMode`]) the
//! newline are rewritten. JSON and `.xcstrings` values are stored verbatim and
//! rely on `serde_json` for string-literal escaping.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::Error;

/// Which dialect of the Android escaping rules to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapeMode {
    /// Escape newlines as the two characters `\n`.
    #[default]
    Standard,
    /// Leave newlines untouched, as the older resource files did.
    Legacy,
}

impl Display for EscapeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EscapeMode::Standard => write!(f, "standard"),
            EscapeMode::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for EscapeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(EscapeMode::Standard),
            "legacy" => Ok(EscapeMode::Legacy),
            other => Err(Error::UnknownEscapeMode(other.to_string())),
        }
    }
}

/// Escapes `text` for use as the body of a `<string>` element.
///
/// The apostrophe is handled first; `&` must be replaced before `<` and `>` so
/// the entities introduced for those are not escaped twice.
pub fn escape(text: &str, mode: EscapeMode) -> String {
    let escaped = text
        .replace('\'', "\\'")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    match mode {
        EscapeMode::Standard => escaped.replace('\n', "\\n"),
        EscapeMode::Legacy => escaped,
    }
}

/// Inverse of [`escape`].
///
/// `&amp;` is resolved after `&lt;`/`&gt;` so that `&amp;lt;` decodes to `&lt;`.
pub fn unescape(text: &str, mode: EscapeMode) -> String {
    let unescaped = text
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
        .replace("\\'", "'");
    match mode {
        EscapeMode::Standard => unescaped.replace("\\n", "\n"),
        EscapeMode::Legacy => unescaped,
    }
}

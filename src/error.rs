//! All error types for the l10n-bridge crate.
//!
//! These are returned from every fatal failure of a conversion run (missing
//! artifacts, malformed documents, I/O). Per-entry anomalies are not errors;
//! they are reported through [`crate::pipeline::ConversionReport`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing {language} artifact at `{}`", .path.display())]
    MissingArtifact { language: String, path: PathBuf },

    #[error("missing directory `{}`", .0.display())]
    MissingDirectory(PathBuf),

    #[error("no table for source language `{0}`")]
    MissingSourceLanguage(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("unknown escape mode `{0}`")]
    UnknownEscapeMode(String),
}

impl Error {
    /// Creates a missing-artifact error for `language` at `path`.
    pub fn missing_artifact(language: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::MissingArtifact {
            language: language.into(),
            path: path.into(),
        }
    }
}

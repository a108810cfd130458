//! On-disk layout and run settings.
//!
//! Defaults follow the Scribe-i18n repository layout:
//!
//! ```text
//! {root}/jsons/{lang}.json
//! {root}/values/{lang}/string.xml
//! {root}/Localizable.xcstrings
//! ```
//!
//! An optional `l10n-bridge.toml` at the root overrides any of these:
//!
//! ```toml
//! json_dir = "i18n/jsons"
//! values_dir = "app/src/main/res"
//! catalog = "ios/Localizable.xcstrings"
//! xml_file_name = "strings.xml"
//! source_language = "en-US"
//! escape = "legacy"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{error::Error, escape::EscapeMode};

pub const CONFIG_FILE_NAME: &str = "l10n-bridge.toml";
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en-US";
pub const DEFAULT_XML_FILE_NAME: &str = "string.xml";
pub const DEFAULT_CATALOG_FILE_NAME: &str = "Localizable.xcstrings";

/// Where every artifact lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub json_dir: PathBuf,
    pub values_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub xml_file_name: String,
}

impl Layout {
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Layout {
            json_dir: root.join("jsons"),
            values_dir: root.join("values"),
            catalog_path: root.join(DEFAULT_CATALOG_FILE_NAME),
            xml_file_name: DEFAULT_XML_FILE_NAME.to_string(),
        }
    }

    pub fn json_path(&self, language: &str) -> PathBuf {
        self.json_dir.join(format!("{}.json", language))
    }

    pub fn xml_path(&self, language: &str) -> PathBuf {
        self.values_dir.join(language).join(&self.xml_file_name)
    }
}

/// Everything a conversion run needs to know besides its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub layout: Layout,
    pub source_language: String,
    pub escape_mode: EscapeMode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    json_dir: Option<PathBuf>,
    values_dir: Option<PathBuf>,
    catalog: Option<PathBuf>,
    xml_file_name: Option<String>,
    source_language: Option<String>,
    escape: Option<String>,
}

impl Settings {
    /// Default settings for `root`, ignoring any config file.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Settings {
            layout: Layout::from_root(root),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            escape_mode: EscapeMode::default(),
        }
    }

    /// Default settings for `root`, overridden by `root/l10n-bridge.toml` when present.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref();
        let path = root.join(CONFIG_FILE_NAME);
        let settings = Settings::new(root);
        if !path.is_file() {
            return Ok(settings);
        }
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = fs::read_to_string(&path)?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        settings.apply(file, root)
    }

    fn apply(mut self, file: ConfigFile, root: &Path) -> Result<Self, Error> {
        if let Some(dir) = file.json_dir {
            self.layout.json_dir = root.join(dir);
        }
        if let Some(dir) = file.values_dir {
            self.layout.values_dir = root.join(dir);
        }
        if let Some(path) = file.catalog {
            self.layout.catalog_path = root.join(path);
        }
        if let Some(name) = file.xml_file_name {
            self.layout.xml_file_name = name;
        }
        if let Some(lang) = file.source_language.filter(|l| !l.trim().is_empty()) {
            self.source_language = lang.trim().to_string();
        }
        if let Some(mode) = file.escape {
            self.escape_mode = mode.parse()?;
        }
        Ok(self)
    }
}

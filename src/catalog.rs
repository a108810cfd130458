//! The multi-language aggregate and its reshaping to and from `.xcstrings`.
//!
//! Per-language formats (Android XML, JSON) hold one [`StringTable`] each. The
//! Apple catalog nests every language under each key, with the source
//! language's table deciding which keys exist.

use std::collections::BTreeMap;

use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    formats::xcstrings::{Format as XcstringsFormat, Item, Localization, StringUnit},
    types::StringTable,
};

/// Language code → [`StringTable`], plus the designated source language.
///
/// Languages iterate in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    source_language: String,
    tables: BTreeMap<String, StringTable>,
}

/// A translation that cannot be placed in the catalog because its key is not
/// in the source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unrepresentable {
    pub language: String,
    pub key: String,
}

/// Result of [`build_xcstrings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogBuild {
    pub format: XcstringsFormat,
    pub unrepresentable: Vec<Unrepresentable>,
}

impl LanguageCatalog {
    pub fn new(source_language: impl Into<String>) -> Self {
        LanguageCatalog {
            source_language: source_language.into(),
            tables: BTreeMap::new(),
        }
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn insert(&mut self, language: impl Into<String>, table: StringTable) -> Option<StringTable> {
        self.tables.insert(language.into(), table)
    }

    pub fn get(&self, language: &str) -> Option<&StringTable> {
        self.tables.get(language)
    }

    pub fn source_table(&self) -> Option<&StringTable> {
        self.tables.get(&self.source_language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StringTable)> {
        self.tables.iter().map(|(lang, table)| (lang.as_str(), table))
    }

    /// Consumes the catalog, yielding each language's table in sorted order.
    pub fn into_tables(self) -> impl Iterator<Item = (String, StringTable)> {
        self.tables.into_iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Builds the Apple catalog, driven by this catalog's source table.
    pub fn to_xcstrings(&self) -> Result<CatalogBuild, Error> {
        let source = self
            .source_table()
            .ok_or_else(|| Error::MissingSourceLanguage(self.source_language.clone()))?;
        Ok(build_xcstrings(&self.source_language, source, self.iter()))
    }

    /// Reconstructs one table per entry of `languages` from `format`.
    ///
    /// Missing, empty, and self-referencing (`value == key`) translations all
    /// become `""`.
    pub fn from_xcstrings<I, S>(
        format: &XcstringsFormat,
        languages: I,
        source_language: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = LanguageCatalog::new(source_language);
        for language in languages {
            let language = language.into();
            let code = catalog_code(&language, &catalog.source_language);
            let table = format
                .strings
                .iter()
                .map(|(key, item)| {
                    let value = item
                        .value(&code)
                        .filter(|v| !v.is_empty() && *v != key.as_str())
                        .unwrap_or_default();
                    (key.clone(), value.to_string())
                })
                .collect();
            catalog.insert(language, table);
        }
        catalog
    }
}

/// Builds an Apple catalog whose keys are exactly those of `source`.
///
/// `tables` may include the source language itself. A language gets a
/// `localizations` entry for a key only when its translation is non-empty.
/// Keys a table has beyond `source` are returned as [`Unrepresentable`].
/// A language whose tag equals the source language's catalog code (`en` next
/// to source `en-US`) is left out so every code appears once.
pub fn build_xcstrings<'a, I>(source_language: &str, source: &StringTable, tables: I) -> CatalogBuild
where
    I: IntoIterator<Item = (&'a str, &'a StringTable)>,
{
    let source_code = catalog_code(source_language, source_language);
    let tables: Vec<(String, &StringTable)> = tables
        .into_iter()
        .filter(|(lang, _)| {
            // The source language owns its normalized code (`en` for `en-US`).
            let shadowed = *lang != source_language && *lang == source_code;
            if shadowed {
                tracing::warn!(
                    language = %lang,
                    source_language,
                    "language shares the source language's catalog code, not written to catalog"
                );
            }
            !shadowed
        })
        .map(|(lang, table)| (catalog_code(lang, source_language), table))
        .collect();

    let strings = source
        .keys()
        .map(|key| {
            let localizations = tables
                .iter()
                .filter_map(|(code, table)| {
                    table
                        .get(key)
                        .filter(|value| !value.is_empty())
                        .map(|value| (code.clone(), Localization::from(StringUnit::untracked(value))))
                })
                .collect();
            (
                key.to_string(),
                Item {
                    comment: Some(String::new()),
                    localizations,
                },
            )
        })
        .collect();

    let mut unrepresentable = Vec::new();
    for (code, table) in &tables {
        for key in table.keys().filter(|key| !source.contains_key(key)) {
            unrepresentable.push(Unrepresentable {
                language: code.clone(),
                key: key.to_string(),
            });
        }
    }

    let mut format = XcstringsFormat::new(source_code);
    format.strings = strings;
    CatalogBuild {
        format,
        unrepresentable,
    }
}

/// The code `language` is stored under inside a catalog.
///
/// The source language is reduced to its primary language subtag (`en-US` →
/// `en`); every other language keeps its tag.
pub fn catalog_code(language: &str, source_language: &str) -> String {
    if language != source_language {
        return language.to_string();
    }
    language
        .parse::<LanguageIdentifier>()
        .map(|id| id.language.to_string())
        .unwrap_or_else(|_| language.to_string())
}

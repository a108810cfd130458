//! Directional conversion runs.
//!
//! A run is a single sequential pass: discover the languages present on disk,
//! parse every table, reshape into the target's structure, then serialize and
//! write every output. Any missing input aborts the run; outputs already
//! written are left in place.
//!
//! Every direction takes its languages from the `{lang}.json` stems of the JSON
//! directory, including XML to JSON, which rewrites those files.

use std::{
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    catalog::{LanguageCatalog, Unrepresentable},
    config::Settings,
    error::Error,
    formats::{
        AndroidStringsFormat, FormatType, JsonFormat, XcstringsFormat,
        android_strings::MalformedEntry,
    },
    traits::Parser,
};

/// The four supported conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    XmlToJson,
    JsonToXml,
    JsonToCatalog,
    CatalogToJson,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::XmlToJson,
        Direction::JsonToXml,
        Direction::JsonToCatalog,
        Direction::CatalogToJson,
    ];

    pub fn source(&self) -> FormatType {
        match self {
            Direction::XmlToJson => FormatType::AndroidStrings,
            Direction::JsonToXml | Direction::JsonToCatalog => FormatType::Json,
            Direction::CatalogToJson => FormatType::Xcstrings,
        }
    }

    pub fn target(&self) -> FormatType {
        match self {
            Direction::XmlToJson | Direction::CatalogToJson => FormatType::Json,
            Direction::JsonToXml => FormatType::AndroidStrings,
            Direction::JsonToCatalog => FormatType::Xcstrings,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.source(), self.target())
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// Accepts `"{source}-to-{target}"` using any spelling [`FormatType`] accepts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, target) = s
            .split_once("-to-")
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))?;
        let (source, target) = (source.parse::<FormatType>()?, target.parse::<FormatType>()?);
        Direction::ALL
            .into_iter()
            .find(|d| d.source() == source && d.target() == target)
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

/// What a completed run did, including the entries it had to leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub direction: Direction,
    pub languages: Vec<String>,
    pub written: Vec<PathBuf>,
    /// `(language, entry)` for every skipped `<string>` element.
    pub malformed: Vec<(String, MalformedEntry)>,
    /// Keys dropped from the catalog because the source table lacks them.
    pub unrepresentable: Vec<Unrepresentable>,
}

impl ConversionReport {
    fn new(direction: Direction, languages: Vec<String>) -> Self {
        ConversionReport {
            direction,
            languages,
            written: Vec::new(),
            malformed: Vec::new(),
            unrepresentable: Vec::new(),
        }
    }
}

/// Runs one conversion with `settings`.
pub fn run(direction: Direction, settings: &Settings) -> Result<ConversionReport, Error> {
    tracing::info!(%direction, source_language = %settings.source_language, "starting conversion");
    let report = match direction {
        Direction::XmlToJson => xml_to_json(settings),
        Direction::JsonToXml => json_to_xml(settings),
        Direction::JsonToCatalog => json_to_catalog(settings),
        Direction::CatalogToJson => catalog_to_json(settings),
    }?;
    tracing::info!(
        %direction,
        languages = report.languages.len(),
        files = report.written.len(),
        "conversion finished"
    );
    Ok(report)
}

fn xml_to_json(settings: &Settings) -> Result<ConversionReport, Error> {
    let languages = discover_json_languages(&settings.layout.json_dir)?;
    let mut report = ConversionReport::new(Direction::XmlToJson, languages.clone());
    let mut catalog = LanguageCatalog::new(&settings.source_language);

    for lang in &languages {
        let format: AndroidStringsFormat = read_artifact(lang, &settings.layout.xml_path(lang))?;
        for entry in &format.malformed {
            tracing::warn!(
                language = %lang,
                line = entry.line,
                snippet = %entry.snippet,
                "skipping malformed string entry"
            );
        }
        report
            .malformed
            .extend(format.malformed.iter().map(|e| (lang.clone(), e.clone())));
        catalog.insert(lang.clone(), format.to_table(settings.escape_mode));
    }

    write_json_tables(catalog, settings, &mut report)?;
    Ok(report)
}

fn json_to_xml(settings: &Settings) -> Result<ConversionReport, Error> {
    let languages = discover_json_languages(&settings.layout.json_dir)?;
    let catalog = read_json_catalog(&languages, settings)?;
    let mut report = ConversionReport::new(Direction::JsonToXml, languages);

    for (lang, table) in catalog.iter() {
        let path = settings.layout.xml_path(lang);
        AndroidStringsFormat::from_table(table, settings.escape_mode).write_to(&path)?;
        tracing::debug!(language = %lang, path = %path.display(), "wrote strings.xml");
        report.written.push(path);
    }
    Ok(report)
}

fn json_to_catalog(settings: &Settings) -> Result<ConversionReport, Error> {
    let languages = discover_json_languages(&settings.layout.json_dir)?;
    let catalog = read_json_catalog(&languages, settings)?;
    let mut report = ConversionReport::new(Direction::JsonToCatalog, languages);

    let source = catalog.source_table().ok_or_else(|| {
        Error::missing_artifact(
            &settings.source_language,
            settings.layout.json_path(&settings.source_language),
        )
    })?;
    let build = crate::catalog::build_xcstrings(&settings.source_language, source, catalog.iter());
    for dropped in &build.unrepresentable {
        tracing::debug!(
            language = %dropped.language,
            key = %dropped.key,
            "key missing from source language, not written to catalog"
        );
    }

    let path = &settings.layout.catalog_path;
    build.format.write_to(path)?;
    tracing::debug!(path = %path.display(), "wrote catalog");
    report.written.push(path.clone());
    report.unrepresentable = build.unrepresentable;
    Ok(report)
}

fn catalog_to_json(settings: &Settings) -> Result<ConversionReport, Error> {
    let languages = discover_json_languages(&settings.layout.json_dir)?;
    let format: XcstringsFormat = read_artifact("catalog", &settings.layout.catalog_path)?;
    let catalog =
        LanguageCatalog::from_xcstrings(&format, languages.iter(), &settings.source_language);
    let mut report = ConversionReport::new(Direction::CatalogToJson, languages);

    write_json_tables(catalog, settings, &mut report)?;
    Ok(report)
}

/// Reads `{json_dir}/{lang}.json` for every language.
pub fn read_json_catalog(languages: &[String], settings: &Settings) -> Result<LanguageCatalog, Error> {
    let mut catalog = LanguageCatalog::new(&settings.source_language);
    for lang in languages {
        let format: JsonFormat = read_artifact(lang, &settings.layout.json_path(lang))?;
        catalog.insert(lang.clone(), format.into());
    }
    Ok(catalog)
}

fn write_json_tables(
    catalog: LanguageCatalog,
    settings: &Settings,
    report: &mut ConversionReport,
) -> Result<(), Error> {
    for (lang, table) in catalog.into_tables() {
        let path = settings.layout.json_path(&lang);
        JsonFormat::from(table).write_to(&path)?;
        tracing::debug!(language = %lang, path = %path.display(), "wrote json");
        report.written.push(path);
    }
    Ok(())
}

/// Languages with a `{lang}.json` file in `dir`, sorted.
pub fn discover_json_languages(dir: &Path) -> Result<Vec<String>, Error> {
    let mut languages = Vec::new();
    for entry in read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(lang) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.strip_suffix(".json"))
            .filter(|lang| !lang.is_empty())
        {
            languages.push(lang.to_string());
        }
    }
    languages.sort();
    tracing::debug!(dir = %dir.display(), ?languages, "discovered json languages");
    Ok(languages)
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, Error> {
    if !dir.is_dir() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }
    Ok(fs::read_dir(dir)?)
}

/// Parses `path`, treating an absent or unreadable file as a missing artifact.
fn read_artifact<F: Parser>(language: &str, path: &Path) -> Result<F, Error> {
    if !path.is_file() {
        return Err(Error::missing_artifact(language, path));
    }
    F::read_from(path).map_err(|e| match e {
        Error::Io(_) => Error::missing_artifact(language, path),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_direction_formats() {
        assert_eq!(Direction::XmlToJson.source(), FormatType::AndroidStrings);
        assert_eq!(Direction::JsonToCatalog.target(), FormatType::Xcstrings);
        assert_eq!(Direction::CatalogToJson.to_string(), "xcstrings to json");
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("xml-to-json".parse::<Direction>().unwrap(), Direction::XmlToJson);
        assert_eq!("json-to-catalog".parse::<Direction>().unwrap(), Direction::JsonToCatalog);
        assert!("xml-to-xcstrings".parse::<Direction>().is_err());
        assert!("json".parse::<Direction>().is_err());
    }

    #[test]
    fn test_discover_json_languages_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["en-US.json", "de.json", "notes.txt", ".json"] {
            fs::write(temp_dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(temp_dir.path().join("fr.json")).unwrap();
        let languages = discover_json_languages(temp_dir.path()).unwrap();
        assert_eq!(languages, vec!["de", "en-US"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert!(matches!(
            discover_json_languages(&missing),
            Err(Error::MissingDirectory(p)) if p == missing
        ));
    }

    #[test]
    fn test_read_artifact_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("de.json");
        let result: Result<JsonFormat, _> = read_artifact("de", &path);
        assert!(matches!(
            result,
            Err(Error::MissingArtifact { language, .. }) if language == "de"
        ));
    }
}

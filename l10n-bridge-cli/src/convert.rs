use std::path::Path;

use l10n_bridge::{ConversionReport, Direction, Error, EscapeMode, Settings, run};

/// Loads the settings for `root` and applies command-line overrides on top.
pub fn settings_for(
    root: &Path,
    source_language: Option<&str>,
    legacy_escapes: bool,
) -> Result<Settings, Error> {
    let mut settings = Settings::load(root)?;
    if let Some(lang) = source_language.map(str::trim).filter(|l| !l.is_empty()) {
        settings.source_language = lang.to_string();
    }
    if legacy_escapes {
        settings.escape_mode = EscapeMode::Legacy;
    }
    Ok(settings)
}

/// Runs `direction` and prints the confirmation line.
pub fn run_convert_command(direction: Direction, settings: &Settings) -> Result<ConversionReport, Error> {
    let report = run(direction, settings)?;
    if !report.malformed.is_empty() {
        println!(
            "⚠️  Skipped {} malformed <string> entr{}",
            report.malformed.len(),
            if report.malformed.len() == 1 { "y" } else { "ies" }
        );
    }
    if !report.unrepresentable.is_empty() {
        println!(
            "⚠️  Dropped {} translation(s) whose key is missing from `{}`",
            report.unrepresentable.len(),
            settings.source_language
        );
    }
    println!("{}", confirmation_line(&report));
    Ok(report)
}

pub fn confirmation_line(report: &ConversionReport) -> String {
    let target = match report.direction {
        Direction::XmlToJson | Direction::CatalogToJson => "the localization JSON files",
        Direction::JsonToXml => "the Android strings files",
        Direction::JsonToCatalog => "the Localizable.xcstrings file",
    };
    let source = match report.direction {
        Direction::XmlToJson => "Android strings files",
        Direction::JsonToXml | Direction::JsonToCatalog => "localization JSON files",
        Direction::CatalogToJson => "Localizable.xcstrings file",
    };
    format!(
        "✅ Successfully converted {} to {} ({} language{}, {} file{} written)",
        source,
        target,
        report.languages.len(),
        if report.languages.len() == 1 { "" } else { "s" },
        report.written.len(),
        if report.written.len() == 1 { "" } else { "s" },
    )
}

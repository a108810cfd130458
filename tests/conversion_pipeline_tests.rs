use indoc::indoc;
use l10n_bridge::{Direction, Error, EscapeMode, Settings, run};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

fn seed_jsons(root: &Path) {
    write(
        &root.join("jsons/en-US.json"),
        r#"{"hello": "Hi", "bye": "Bye & see you", "quote": "It's\nfine"}"#,
    );
    write(
        &root.join("jsons/de.json"),
        r#"{"hello": "Hallo", "bye": "", "extra": "Nur Deutsch"}"#,
    );
}

#[test]
fn test_json_to_catalog_scenario() {
    let temp_dir = TempDir::new().unwrap();
    write(&temp_dir.path().join("jsons/en-US.json"), r#"{"hello": "Hi"}"#);
    write(&temp_dir.path().join("jsons/de.json"), r#"{"hello": "Hallo"}"#);

    let settings = Settings::new(temp_dir.path());
    let report = run(Direction::JsonToCatalog, &settings).unwrap();
    assert_eq!(report.languages, vec!["de", "en-US"]);
    assert_eq!(report.written, vec![settings.layout.catalog_path.clone()]);

    let expected = indoc! {r#"
        {
          "sourceLanguage" : "en",
          "strings" : {
            "hello" : {
              "comment" : "",
              "localizations" : {
                "de" : {
                  "stringUnit" : {
                    "state" : "",
                    "value" : "Hallo"
                  }
                },
                "en" : {
                  "stringUnit" : {
                    "state" : "",
                    "value" : "Hi"
                  }
                }
              }
            }
          },
          "version" : "1.0"
        }
    "#};
    assert_eq!(read(&settings.layout.catalog_path), expected.trim_end());
}

#[test]
fn test_json_to_catalog_omits_empty_and_source_absent_keys() {
    let temp_dir = TempDir::new().unwrap();
    seed_jsons(temp_dir.path());
    let settings = Settings::new(temp_dir.path());

    let report = run(Direction::JsonToCatalog, &settings).unwrap();
    assert_eq!(report.unrepresentable.len(), 1);
    assert_eq!(report.unrepresentable[0].language, "de");
    assert_eq!(report.unrepresentable[0].key, "extra");

    let raw = read(&settings.layout.catalog_path);
    // Keys follow the source table's order.
    let hello = raw.find("\"hello\" : {").unwrap();
    let bye = raw.find("\"bye\" : {").unwrap();
    let quote = raw.find("\"quote\" : {").unwrap();
    assert!(hello < bye && bye < quote);

    let catalog: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let strings = &catalog["strings"];
    assert!(strings.get("extra").is_none());
    assert!(strings["bye"]["localizations"].get("de").is_none());
    assert_eq!(
        strings["bye"]["localizations"]["en"]["stringUnit"]["value"],
        "Bye & see you"
    );
    assert_eq!(
        strings["quote"]["localizations"]["en"]["stringUnit"]["value"],
        "It's\nfine"
    );
}

#[test]
fn test_json_to_catalog_requires_source_language() {
    let temp_dir = TempDir::new().unwrap();
    write(&temp_dir.path().join("jsons/de.json"), r#"{"hello": "Hallo"}"#);
    let settings = Settings::new(temp_dir.path());

    let result = run(Direction::JsonToCatalog, &settings);
    assert!(matches!(
        result,
        Err(Error::MissingArtifact { language, .. }) if language == "en-US"
    ));
    assert!(!settings.layout.catalog_path.exists());
}

#[test]
fn test_catalog_to_json_reconstructs_tables() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("Localizable.xcstrings"),
        indoc! {r#"
            {
              "sourceLanguage" : "en",
              "strings" : {
                "title" : {
                  "localizations" : {
                    "en" : { "stringUnit" : { "state" : "translated", "value" : "Title" } },
                    "de" : { "stringUnit" : { "state" : "", "value" : "title" } }
                  }
                },
                "app_name" : {
                  "comment" : "",
                  "localizations" : {
                    "en" : { "stringUnit" : { "state" : "", "value" : "Scribe" } },
                    "de" : { "stringUnit" : { "state" : "", "value" : "" } }
                  }
                },
                "untranslated" : {}
              },
              "version" : "1.0"
            }
        "#},
    );
    // Existing files decide which languages are regenerated.
    write(&root.join("jsons/en-US.json"), "{}");
    write(&root.join("jsons/de.json"), "{}");

    let settings = Settings::new(root);
    let report = run(Direction::CatalogToJson, &settings).unwrap();
    assert_eq!(report.written.len(), 2);

    assert_eq!(
        read(&root.join("jsons/en-US.json")),
        "{\n  \"title\": \"Title\",\n  \"app_name\": \"Scribe\",\n  \"untranslated\": \"\"\n}\n"
    );
    assert_eq!(
        read(&root.join("jsons/de.json")),
        "{\n  \"title\": \"\",\n  \"app_name\": \"\",\n  \"untranslated\": \"\"\n}\n"
    );
}

#[test]
fn test_catalog_to_json_missing_catalog_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    write(&temp_dir.path().join("jsons/en-US.json"), "{}");
    let settings = Settings::new(temp_dir.path());

    assert!(matches!(
        run(Direction::CatalogToJson, &settings),
        Err(Error::MissingArtifact { .. })
    ));
}

#[test]
fn test_catalog_without_strings_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    write(&temp_dir.path().join("jsons/en-US.json"), "{}");
    write(
        &temp_dir.path().join("Localizable.xcstrings"),
        r#"{"sourceLanguage": "en", "version": "1.0"}"#,
    );
    let settings = Settings::new(temp_dir.path());

    assert!(matches!(
        run(Direction::CatalogToJson, &settings),
        Err(Error::Parse(_))
    ));
}

#[test]
fn test_xml_json_xml_reproduces_escaped_form() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="utf-8"?>
        <resources>
            <string name="hello">Hi &amp; bye</string>
            <string name="tag">&lt;b&gt;Bold\'s\nnext&lt;/b&gt;</string>
        </resources>
    "#};
    write(&root.join("values/en-US/string.xml"), xml);
    write(&root.join("jsons/en-US.json"), "{}");
    let settings = Settings::new(root);

    let report = run(Direction::XmlToJson, &settings).unwrap();
    assert_eq!(report.languages, vec!["en-US"]);
    assert!(report.malformed.is_empty());
    assert_eq!(
        read(&root.join("jsons/en-US.json")),
        "{\n  \"hello\": \"Hi & bye\",\n  \"tag\": \"<b>Bold's\\nnext</b>\"\n}\n"
    );

    fs::remove_dir_all(root.join("values")).unwrap();
    run(Direction::JsonToXml, &settings).unwrap();
    assert_eq!(read(&root.join("values/en-US/string.xml")), xml);
}

#[test]
fn test_xml_to_json_reports_malformed_entries() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("values/de/string.xml"),
        "<resources>\n    <string name=\"ok\">Gut</string>\n    <string name=\"broken\"/>\n</resources>\n",
    );
    write(&root.join("jsons/de.json"), "{}");
    let settings = Settings::new(root);

    let report = run(Direction::XmlToJson, &settings).unwrap();
    assert_eq!(report.malformed.len(), 1);
    assert_eq!(report.malformed[0].0, "de");
    assert_eq!(report.malformed[0].1.line, 3);
    assert_eq!(read(&root.join("jsons/de.json")), "{\n  \"ok\": \"Gut\"\n}\n");
}

#[test]
fn test_xml_to_json_missing_xml_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("jsons/de.json"), "{}");
    write(&root.join("jsons/fr.json"), "{}");
    write(&root.join("values/de/string.xml"), "<resources></resources>");
    let settings = Settings::new(root);

    assert!(matches!(
        run(Direction::XmlToJson, &settings),
        Err(Error::MissingArtifact { language, .. }) if language == "fr"
    ));
}

#[test]
fn test_xml_to_json_ignores_values_dirs_without_json() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("jsons/de.json"), "{}");
    write(
        &root.join("values/de/string.xml"),
        "<resources>\n    <string name=\"hello\">Hallo</string>\n</resources>\n",
    );
    fs::create_dir_all(root.join("values/night")).unwrap();
    let settings = Settings::new(root);

    let report = run(Direction::XmlToJson, &settings).unwrap();
    assert_eq!(report.languages, vec!["de"]);
    assert!(!root.join("jsons/night.json").exists());
    assert_eq!(read(&root.join("jsons/de.json")), "{\n  \"hello\": \"Hallo\"\n}\n");
}

#[test]
fn test_json_to_catalog_source_owns_its_catalog_code() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("jsons/en-US.json"), r#"{"hello": "Hi"}"#);
    write(&root.join("jsons/en.json"), r#"{"hello": "Hello"}"#);
    let settings = Settings::new(root);

    run(Direction::JsonToCatalog, &settings).unwrap();
    let raw = read(&settings.layout.catalog_path);
    assert_eq!(raw.matches("\"en\" :").count(), 1);

    run(Direction::CatalogToJson, &settings).unwrap();
    assert_eq!(read(&root.join("jsons/en-US.json")), "{\n  \"hello\": \"Hi\"\n}\n");
}

#[test]
fn test_json_to_xml_rejects_nested_json() {
    let temp_dir = TempDir::new().unwrap();
    write(
        &temp_dir.path().join("jsons/en-US.json"),
        r#"{"menu": {"open": "Open"}}"#,
    );
    let settings = Settings::new(temp_dir.path());

    assert!(matches!(
        run(Direction::JsonToXml, &settings),
        Err(Error::Parse(_))
    ));
}

#[test]
fn test_legacy_escape_mode_keeps_raw_newlines() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("jsons/en-US.json"), r#"{"multi": "one\ntwo"}"#);
    let mut settings = Settings::new(root);
    settings.escape_mode = EscapeMode::Legacy;

    run(Direction::JsonToXml, &settings).unwrap();
    assert!(read(&root.join("values/en-US/string.xml"))
        .contains("    <string name=\"multi\">one\ntwo</string>\n"));
}

#[test]
fn test_runs_are_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    seed_jsons(root);
    let settings = Settings::new(root);

    run(Direction::JsonToCatalog, &settings).unwrap();
    run(Direction::JsonToXml, &settings).unwrap();
    let catalog_first = read(&settings.layout.catalog_path);
    let xml_first = read(&settings.layout.xml_path("de"));

    run(Direction::JsonToCatalog, &settings).unwrap();
    run(Direction::JsonToXml, &settings).unwrap();
    assert_eq!(read(&settings.layout.catalog_path), catalog_first);
    assert_eq!(read(&settings.layout.xml_path("de")), xml_first);
}

#[test]
fn test_config_file_redirects_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("l10n-bridge.toml"),
        "json_dir = \"i18n\"\ncatalog = \"ios/Strings.xcstrings\"\nsource_language = \"de\"\n",
    );
    write(&root.join("i18n/de.json"), r#"{"hello": "Hallo"}"#);
    write(&root.join("i18n/en-US.json"), r#"{"hello": "Hi", "only_en": "x"}"#);

    let settings = Settings::load(root).unwrap();
    let report = run(Direction::JsonToCatalog, &settings).unwrap();
    assert_eq!(report.written, vec![root.join("ios/Strings.xcstrings")]);

    let raw = read(&root.join("ios/Strings.xcstrings"));
    let catalog: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(catalog["sourceLanguage"], "de");
    assert!(catalog["strings"].get("only_en").is_none());
    assert_eq!(
        catalog["strings"]["hello"]["localizations"]["en-US"]["stringUnit"]["value"],
        "Hi"
    );
}

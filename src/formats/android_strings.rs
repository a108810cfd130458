//! Support for Android `strings.xml` localization files.
//!
//! Parsing is a permissive scan for `<string name="KEY">VALUE</string>`
//! elements rather than a full XML parse: anything that does not match is
//! skipped and reported as a [`MalformedEntry`]. Values are kept in their
//! on-disk (escaped) form until converted with [`Format::to_table`].

use std::io::{BufRead, Read, Write};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    escape::{EscapeMode, escape, unescape},
    traits::Parser,
    types::StringTable,
};

lazy_static! {
    static ref STRING_ELEMENT: Regex =
        Regex::new(r#"(?s)<string name="(.*?)">(.*?)</string>"#).expect("valid string regex");
    static ref STRING_OPENING: Regex = Regex::new(r"<string[\s/>]").expect("valid opening regex");
}

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub strings: Vec<StringResource>,
    pub malformed: Vec<MalformedEntry>,
}

/// One `<string>` element, with its value still escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringResource {
    pub name: String,
    pub value: String,
}

/// A `<string` opening that did not match the expected element grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    /// 1-based line of the opening tag.
    pub line: usize,
    /// The rest of that line, for diagnostics.
    pub snippet: String,
}

impl Format {
    /// Scans `content` for string elements.
    pub fn parse(content: &str) -> Self {
        let mut strings = Vec::new();
        let mut starts = Vec::new();
        for caps in STRING_ELEMENT.captures_iter(content) {
            if let (Some(whole), Some(name), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
            {
                starts.push(whole.start());
                strings.push(StringResource {
                    name: name.as_str().to_string(),
                    value: value.as_str().to_string(),
                });
            }
        }

        let malformed = STRING_OPENING
            .find_iter(content)
            .filter(|m| starts.binary_search(&m.start()).is_err())
            .map(|m| MalformedEntry {
                line: content[..m.start()].matches('\n').count() + 1,
                snippet: content[m.start()..]
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .trim_end()
                    .to_string(),
            })
            .collect();

        Format { strings, malformed }
    }

    /// Builds the document for `table`, escaping every value.
    pub fn from_table(table: &StringTable, mode: EscapeMode) -> Self {
        Format {
            strings: table
                .iter()
                .map(|(name, value)| StringResource {
                    name: name.to_string(),
                    value: escape(value, mode),
                })
                .collect(),
            malformed: Vec::new(),
        }
    }

    /// Unescapes every value into a [`StringTable`]; a later duplicate key wins.
    pub fn to_table(&self, mode: EscapeMode) -> StringTable {
        self.strings
            .iter()
            .map(|sr| (sr.name.clone(), unescape(&sr.value, mode)))
            .collect()
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Format::parse(&content))
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writeln!(writer, "{}", XML_DECLARATION)?;
        writeln!(writer, "<resources>")?;
        for sr in &self.strings {
            writeln!(writer, r#"    <string name="{}">{}</string>"#, sr.name, sr.value)?;
        }
        writeln!(writer, "</resources>")?;
        Ok(())
    }
}

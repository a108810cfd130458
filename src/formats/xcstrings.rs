//! Support for Apple `.xcstrings` string catalogs.
//!
//! Only the fields this tool writes are modelled: a per-key `comment` and one
//! `stringUnit` per language. Unknown fields are ignored when reading. Object
//! order is preserved so the `strings` map follows the order it was built or
//! stored in.

use std::{
    fmt,
    io::{self, BufRead, Write},
    marker::PhantomData,
};

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::{error::Error, traits::Parser};

/// Catalog version written by this tool.
pub const CATALOG_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    pub source_language: String,
    #[serde(with = "ordered_map")]
    pub strings: Vec<(String, Item)>,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, with = "ordered_map")]
    pub localizations: Vec<(String, Localization)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_unit: Option<StringUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringUnit {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub value: String,
}

impl Format {
    pub fn new(source_language: impl Into<String>) -> Self {
        Format {
            source_language: source_language.into(),
            strings: Vec::new(),
            version: CATALOG_VERSION.to_string(),
        }
    }

    pub fn item(&self, key: &str) -> Option<&Item> {
        self.strings.iter().find(|(k, _)| k == key).map(|(_, item)| item)
    }

    /// Iterates the catalog keys in stored order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(|(k, _)| k.as_str())
    }
}

impl Item {
    /// The `stringUnit.value` stored for `language`, if any.
    pub fn value(&self, language: &str) -> Option<&str> {
        self.localizations
            .iter()
            .find(|(lang, _)| lang == language)
            .and_then(|(_, loc)| loc.string_unit.as_ref())
            .map(|unit| unit.value.as_str())
    }
}

impl From<StringUnit> for Localization {
    fn from(string_unit: StringUnit) -> Self {
        Localization {
            string_unit: Some(string_unit),
        }
    }
}

impl StringUnit {
    /// A unit without translation-state tracking.
    pub fn untracked(value: impl Into<String>) -> Self {
        StringUnit {
            state: String::new(),
            value: value.into(),
        }
    }
}

impl Parser for Format {
    /// Fails with [`Error::Parse`] when `sourceLanguage`, `strings` or `version` is missing.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Writes the catalog the way Xcode lays it out (`"key" : value`).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut serializer = serde_json::Serializer::with_formatter(writer, XcodeFormatter::new());
        self.serialize(&mut serializer).map_err(Error::Parse)
    }
}

/// Two-space pretty printing with a spaced key separator.
struct XcodeFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl XcodeFormatter<'_> {
    fn new() -> Self {
        XcodeFormatter {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for XcodeFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" : ")
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

/// (De)serializes `Vec<(String, V)>` as a JSON object, keeping entry order.
mod ordered_map {
    use super::*;
    use serde::{
        Deserializer, Serializer,
        de::{MapAccess, Visitor},
        ser::SerializeMap,
    };

    #[allow(clippy::ptr_arg)]
    pub(super) fn serialize<S, V>(entries: &Vec<(String, V)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub(super) fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Vec<(String, V)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

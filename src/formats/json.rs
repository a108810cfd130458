//! Support for per-language JSON files (`jsons/{lang}.json`).
//!
//! Each file is a flat object of key → translation. Key order is preserved in
//! both directions and non-ASCII text is written literally.

use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::StringTable};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub table: StringTable,
}

impl Parser for Format {
    /// Fails with [`Error::Parse`] unless the document is a flat string map.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let table = serde_json::from_reader(reader).map_err(Error::Parse)?;
        Ok(Format { table })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, &self.table).map_err(Error::Parse)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl From<StringTable> for Format {
    fn from(table: StringTable) -> Self {
        Format { table }
    }
}

impl From<Format> for StringTable {
    fn from(format: Format) -> Self {
        format.table
    }
}

//! File-wise summary of a Kover/JaCoCo XML coverage report.

use std::{
    fmt::Write as _,
    io::BufRead,
    path::{Path, PathBuf},
};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use thiserror::Error;

pub const DEFAULT_REPORT_PATH: &str = "app/build/reports/kover/xml/report.xml";

/// Counter types printed, in order.
const METRICS: [&str; 4] = ["INSTRUCTION", "BRANCH", "LINE", "METHOD"];

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("report not found at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid report: {0}")]
    InvalidReport(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    pub covered: u64,
    pub missed: u64,
}

impl Counter {
    pub fn total(&self) -> u64 {
        self.covered + self.missed
    }

    pub fn percentage(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.covered as f64 / total as f64 * 100.0,
        }
    }
}

/// Counters of one class, keyed `"{class} (Source: {file})"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassCoverage {
    pub key: String,
    pub counters: Vec<(String, Counter)>,
}

impl ClassCoverage {
    pub fn counter(&self, metric: &str) -> Option<&Counter> {
        self.counters.iter().find(|(m, _)| m == metric).map(|(_, c)| c)
    }

    fn set(&mut self, metric: String, counter: Counter) {
        match self.counters.iter_mut().find(|(m, _)| *m == metric) {
            Some(slot) => slot.1 = counter,
            None => self.counters.push((metric, counter)),
        }
    }
}

/// Classes in document order. Classes without counters are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    pub classes: Vec<ClassCoverage>,
}

impl CoverageReport {
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, CoverageError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CoverageError::NotFound(path.to_path_buf()));
        }
        let reader = Reader::from_file(path)?;
        Self::parse(reader)
    }

    pub fn from_str(xml: &str) -> Result<Self, CoverageError> {
        Self::parse(Reader::from_reader(xml.as_bytes()))
    }

    fn parse<R: BufRead>(mut reader: Reader<R>) -> Result<Self, CoverageError> {
        let mut report = CoverageReport::default();
        let mut buf = Vec::new();
        let mut depth = 0usize;
        // (depth, key) of every open <class>, innermost last
        let mut open_classes: Vec<(usize, String)> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    if e.name().as_ref() == b"class" {
                        open_classes.push((depth, class_key(e)?));
                    } else {
                        record_counter(&mut report, open_classes.last(), depth, e)?;
                    }
                    depth += 1;
                }
                Event::Empty(ref e) => {
                    record_counter(&mut report, open_classes.last(), depth, e)?;
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    if open_classes.last().is_some_and(|(d, _)| *d == depth) {
                        open_classes.pop();
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(report)
    }

    /// The printable summary, one block per class.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "File-wise Coverage Summary");
        let _ = writeln!(out, "{}", "-".repeat(60));
        for class in &self.classes {
            let _ = writeln!(out, "\n {}", class.key);
            for metric in METRICS {
                if let Some(counter) = class.counter(metric) {
                    let _ = writeln!(
                        out,
                        "  {:<12}: {}/{} ({:.2}%)",
                        metric,
                        counter.covered,
                        counter.total(),
                        counter.percentage()
                    );
                }
            }
        }
        let _ = writeln!(out, "Done.");
        out
    }
}

fn record_counter(
    report: &mut CoverageReport,
    current: Option<&(usize, String)>,
    depth: usize,
    e: &BytesStart<'_>,
) -> Result<(), CoverageError> {
    let Some((class_depth, key)) = current else {
        return Ok(());
    };
    // Only direct children; method-level counters are nested deeper.
    if e.name().as_ref() != b"counter" || depth != class_depth + 1 {
        return Ok(());
    }

    let metric = attribute(e, b"type")?.unwrap_or_default();
    let counter = Counter {
        covered: parse_count(attribute(e, b"covered")?)?,
        missed: parse_count(attribute(e, b"missed")?)?,
    };

    let index = match report.classes.iter().position(|c| c.key == *key) {
        Some(index) => index,
        None => {
            report.classes.push(ClassCoverage {
                key: key.clone(),
                counters: Vec::new(),
            });
            report.classes.len() - 1
        }
    };
    report.classes[index].set(metric, counter);
    Ok(())
}

fn class_key(e: &BytesStart<'_>) -> Result<String, CoverageError> {
    let name = attribute(e, b"name")?
        .map(|n| n.replace('/', "."))
        .unwrap_or_else(|| "Unknown".to_string());
    let source = attribute(e, b"sourcefilename")?.unwrap_or_else(|| "Unknown".to_string());
    Ok(format!("{} (Source: {})", name, source))
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, CoverageError> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|err| CoverageError::InvalidReport(err.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn parse_count(value: Option<String>) -> Result<u64, CoverageError> {
    match value {
        None => Ok(0),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| CoverageError::InvalidReport(format!("invalid counter value `{}`", v))),
    }
}

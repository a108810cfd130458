//! CLI library for testing purposes

pub mod convert;
pub mod coverage;

pub use convert::{confirmation_line, run_convert_command, settings_for};
pub use coverage::{CoverageError, CoverageReport};

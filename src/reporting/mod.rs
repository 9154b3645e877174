// src/reporting/mod.rs
//! Output of finished tables.
//!
//! Every sink receives its destination explicitly; nothing is written to a
//! shared, hard-coded path.

pub mod json;
pub mod terminal;

pub use json::JsonSink;
pub use terminal::TerminalSink;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::rows::Table;

/// Something that accepts report tables.
pub trait TableSink {
    /// Writes one table.
    ///
    /// # Errors
    /// Returns error if the destination cannot be written.
    fn write_table(&mut self, table: &Table) -> Result<()>;

    /// Writes tables in order.
    ///
    /// # Errors
    /// Returns the first write error.
    fn write_tables<'a, I>(&mut self, tables: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Table>,
        Self: Sized,
    {
        for table in tables {
            self.write_table(table)?;
        }
        Ok(())
    }
}

/// `<dir>/<file name>_summary.json`, or `_cyclic_summary.json` for cyclic runs.
#[must_use]
pub fn single_output_path(dir: &Path, source: &Path, cyclic: bool) -> PathBuf {
    let stem = source
        .file_name()
        .map_or_else(|| "report".to_string(), |n| n.to_string_lossy().into_owned());
    let suffix = if cyclic {
        "_cyclic_summary.json"
    } else {
        "_summary.json"
    };
    dir.join(format!("{stem}{suffix}"))
}

pub const STATS_OUTPUT: &str = "MultiFileAnalysis_Summary.json";
pub const ERRORS_OUTPUT: &str = "ErrorStatistics_Summary.json";

// src/reporting/json.rs
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;

use super::TableSink;
use crate::error::{Result, StimtraceError};
use crate::rows::Table;

#[derive(Serialize)]
struct JsonDocument<'a> {
    report: &'a str,
    metadata: &'a [(String, String)],
    tables: &'a [Table],
}

/// Collects tables and writes them as one pretty JSON document to `path`.
#[derive(Debug)]
pub struct JsonSink {
    path: PathBuf,
    report: String,
    metadata: Vec<(String, String)>,
    tables: Vec<Table>,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>, report: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            report: report.into(),
            metadata: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Key/value lines stored next to the tables (campaign info).
    #[must_use]
    pub fn with_metadata(mut self, metadata: Vec<(String, String)>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Writes the document, creating the parent directory if needed.
    ///
    /// # Errors
    /// Returns error if the directory or file cannot be created, or
    /// serialization fails.
    pub fn finish(self) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StimtraceError::io(e, parent))?;
        }
        let file = File::create(&self.path).map_err(|e| StimtraceError::io(e, &self.path))?;
        let doc = JsonDocument {
            report: &self.report,
            metadata: &self.metadata,
            tables: &self.tables,
        };
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &doc)?;
        writer
            .flush()
            .map_err(|e| StimtraceError::io(e, &self.path))?;
        tracing::info!(path = %self.path.display(), tables = self.tables.len(), "wrote report");
        Ok(self.path)
    }
}

impl TableSink for JsonSink {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        self.tables.push(table.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::Cell;

    #[test]
    fn test_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("r.json");

        let mut table = Table::new("Passes", ["Test Case", "Count"]);
        table.push_row(vec![Cell::from("10_A"), Cell::Count(3)]);

        let mut sink = JsonSink::new(&path, "single")
            .with_metadata(vec![("Train".to_string(), "T1".to_string())]);
        sink.write_table(&table).unwrap();
        let written = sink.finish().unwrap();
        assert_eq!(written, path);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["report"], "single");
        assert_eq!(value["metadata"][0][1], "T1");
        assert_eq!(value["tables"][0]["name"], "Passes");
        assert_eq!(value["tables"][0]["rows"][0][0], "10_A");
        assert_eq!(value["tables"][0]["rows"][0][1], 3);
    }
}

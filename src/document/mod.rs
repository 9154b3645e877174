// src/document/mod.rs
//! Document indexing: markup text to a navigable tree with per-node lines.

pub mod parser;
pub mod tree;

pub use tree::{Document, Element, NodeId, NodeKind, NodeRef};

use std::fs;
use std::path::Path;

use crate::error::{Result, StimtraceError};

impl Document {
    /// Parses markup text.
    ///
    /// # Errors
    /// Returns error if the markup cannot be read at all.
    pub fn parse(content: &str) -> Result<Self> {
        parser::parse(content)
    }

    /// Reads and parses a report file.
    ///
    /// # Errors
    /// Returns error if the file is unreadable or its markup is unrecoverable.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| StimtraceError::io(e, path))?;
        let doc = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), nodes = doc.len(), "indexed document");
        Ok(doc)
    }
}

// src/resolve/mod.rs
//! Proximity resolution: which stimulation and test case an event belongs to,
//! using source line numbers as the only signal.

pub mod index;
pub mod markers;

pub use index::{
    resolve_stimulation, resolve_test_case, ProximityResolver, StimulationIndex, TestCaseIndex,
};
pub use markers::{extract_stimulations, extract_test_cases, StimulationMarker, TestCaseMarker};

use crate::config::MarkupConfig;
use crate::document::Document;

impl ProximityResolver {
    /// Extracts both marker kinds from a document.
    #[must_use]
    pub fn from_document(doc: &Document, markup: &MarkupConfig) -> Self {
        Self::new(extract_stimulations(doc, markup), extract_test_cases(doc, markup))
    }
}

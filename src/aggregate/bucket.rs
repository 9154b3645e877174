// src/aggregate/bucket.rs
//! Per-stimulation event buckets.

use indexmap::IndexSet;
use serde::Serialize;

use crate::classify::IssueRecord;

/// One pass or warning event: where it happened and for which test case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EventEntry {
    pub stimulation: String,
    pub test_case: String,
}

/// Pass or warning events grouped under one stimulation key.
///
/// Entries are records rather than parallel lists, so every index describes
/// one whole event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventBucket {
    pub stimulation: String,
    entries: Vec<EventEntry>,
}

impl EventBucket {
    #[must_use]
    pub fn new(stimulation: impl Into<String>) -> Self {
        Self {
            stimulation: stimulation.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: EventEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[EventEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stimulations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.stimulation.as_str())
    }

    pub fn test_cases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.test_case.as_str())
    }

    #[must_use]
    pub fn contains_test_case(&self, test_case: &str) -> bool {
        self.test_cases().any(|t| t == test_case)
    }

    /// Distinct stimulation names, first-seen order.
    #[must_use]
    pub fn distinct_stimulations(&self) -> Vec<&str> {
        self.stimulations().collect::<IndexSet<_>>().into_iter().collect()
    }

    /// Distinct test-case names, first-seen order.
    #[must_use]
    pub fn distinct_test_cases(&self) -> Vec<&str> {
        self.test_cases().collect::<IndexSet<_>>().into_iter().collect()
    }

    /// Reduces the bucket to one entry per distinct event. Idempotent.
    pub fn collapse(&mut self) {
        let mut seen = IndexSet::new();
        self.entries.retain(|e| seen.insert(e.clone()));
    }
}

/// Issues grouped under one stimulation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueBucket {
    pub stimulation: String,
    records: Vec<IssueRecord>,
}

impl IssueBucket {
    #[must_use]
    pub fn new(stimulation: impl Into<String>) -> Self {
        Self {
            stimulation: stimulation.into(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: IssueRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[IssueRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains_test_case(&self, test_case: &str) -> bool {
        self.records.iter().any(|r| r.test_case == test_case)
    }
}

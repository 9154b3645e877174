// src/multirun/frequency.rs
//! Error/failure message frequency across runs.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::classify::{IssueKind, IssueRecord};

/// Text after the first colon, trimmed; the whole message when there is none.
#[must_use]
pub fn normalize_message(message: &str) -> &str {
    message
        .split_once(':')
        .map_or(message, |(_, rest)| rest)
        .trim()
}

/// Occurrences of one normalized message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageFrequencyEntry {
    pub occurrences: usize,
    pub test_cases: BTreeSet<String>,
    pub date_counts: BTreeMap<String, usize>,
    /// Kind of the most recently folded occurrence.
    pub category: IssueKind,
}

impl MessageFrequencyEntry {
    fn new(category: IssueKind) -> Self {
        Self {
            occurrences: 0,
            test_cases: BTreeSet::new(),
            date_counts: BTreeMap::new(),
            category,
        }
    }

    #[must_use]
    pub fn on_date(&self, date: &str) -> Option<usize> {
        self.date_counts.get(date).copied()
    }
}

/// Message-frequency accumulator. Messages keep first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct MessageFrequency {
    #[serde(skip)]
    excluded: Regex,
    entries: IndexMap<String, MessageFrequencyEntry>,
}

impl MessageFrequency {
    /// `excluded` matches test-case names that are never counted.
    #[must_use]
    pub fn new(excluded: Regex) -> Self {
        Self {
            excluded,
            entries: IndexMap::new(),
        }
    }

    /// Folds one issue. Returns `false` when its test case is excluded.
    pub fn fold(&mut self, date: &str, record: &IssueRecord) -> bool {
        if self.excluded.is_match(&record.test_case) {
            return false;
        }
        let entry = self
            .entries
            .entry(normalize_message(&record.message).to_string())
            .or_insert_with(|| MessageFrequencyEntry::new(record.kind));
        entry.occurrences += 1;
        entry.category = record.kind;
        if !entry.test_cases.contains(&record.test_case) {
            entry.test_cases.insert(record.test_case.clone());
        }
        *entry.date_counts.entry(date.to_string()).or_insert(0) += 1;
        true
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &MessageFrequencyEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn get(&self, message: &str) -> Option<&MessageFrequencyEntry> {
        self.entries.get(message)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// src/classify/mod.rs
//! Issue classification: one tagged span to a structured error/failure record.
//!
//! Span text is `timestamp | ... | ... | message`. Malformed spans are never
//! errors; they come back as [`Classification::Skipped`] with the reason.

pub mod types;

pub use types::{Classification, IssueKind, IssueRecord, SkipReason};

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{ClassifierConfig, MarkupConfig};
use crate::constants::{ACTION_SEPARATOR, ISSUE_DELIMITER};
use crate::document::{Document, NodeRef};
use crate::resolve::StimulationIndex;

static TEST_CASE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2,}_[A-Za-z0-9_]+)").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Classifies issue spans against the configured class names.
#[derive(Debug, Clone, Copy)]
pub struct IssueClassifier<'a> {
    markup: &'a MarkupConfig,
    limits: &'a ClassifierConfig,
}

impl<'a> IssueClassifier<'a> {
    #[must_use]
    pub fn new(markup: &'a MarkupConfig, limits: &'a ClassifierConfig) -> Self {
        Self { markup, limits }
    }

    /// Maps the node's first class token to an issue kind.
    #[must_use]
    pub fn kind_of(&self, node: &NodeRef<'_>) -> Option<IssueKind> {
        let class = node.first_class()?;
        if class == self.markup.error_class {
            Some(IssueKind::Error)
        } else if class == self.markup.failure_class {
            Some(IssueKind::Failure)
        } else {
            None
        }
    }

    /// Classifies one node, resolving its stimulation through `stimulations`.
    #[must_use]
    pub fn classify(&self, node: NodeRef<'_>, stimulations: &StimulationIndex) -> Classification {
        let Some(kind) = self.kind_of(&node) else {
            return Classification::Skipped(SkipReason::NotIssueClass);
        };

        let text = node.stripped_text();
        let fields: Vec<&str> = text.split(ISSUE_DELIMITER).collect();
        let (raw_time, raw_message) = match fields.as_slice() {
            [time, _, _, message, ..] | [time, _, message] => (*time, *message),
            _ => {
                return Classification::Skipped(SkipReason::TooFewFields {
                    found: fields.len(),
                })
            }
        };

        let mut message = raw_message.trim().to_string();
        if message.chars().count() > self.limits.continuation_threshold {
            self.append_continuations(&node, &mut message);
        }

        let Some(token) = TEST_CASE_TOKEN.find(&message) else {
            return Classification::Skipped(SkipReason::NoTestCaseToken);
        };
        let test_case = token.as_str().to_string();

        Classification::Record(IssueRecord {
            stimulation: stimulations.resolve(node.line()).to_string(),
            test_case,
            message,
            kind,
            timestamp: strip_timestamp(raw_time),
            previous_actions: self.previous_actions(&node),
        })
    }

    /// Overlong messages continue in the following error spans.
    fn append_continuations(&self, node: &NodeRef<'_>, message: &mut String) {
        let tag = node.name().unwrap_or_default();
        for sibling in node.next_element_siblings().filter(|s| s.is(tag)) {
            if sibling.first_class() != Some(self.markup.error_class.as_str()) {
                break;
            }
            message.push(' ');
            message.push_str(&sibling.stripped_text());
        }
    }

    /// Up to the configured number of preceding informational spans, oldest first.
    fn previous_actions(&self, node: &NodeRef<'_>) -> String {
        let mut actions: Vec<String> = node
            .prev_element_siblings()
            .filter(|s| s.is("span") && s.has_class(&self.markup.info_class))
            .take(self.limits.previous_actions_limit)
            .map(|s| s.stripped_text())
            .collect();
        actions.reverse();
        actions.join(ACTION_SEPARATOR)
    }

    /// Classifies every classed span in the document, in document order.
    pub fn classify_document<'d>(
        &'d self,
        doc: &'d Document,
        stimulations: &'d StimulationIndex,
    ) -> impl Iterator<Item = Classification> + 'd {
        doc.elements_named("span")
            .filter(|span| !span.classes().is_empty())
            .map(move |span| {
                let outcome = self.classify(span, stimulations);
                if let Classification::Skipped(reason) = &outcome {
                    if *reason != SkipReason::NotIssueClass {
                        tracing::debug!(line = span.line(), reason = reason.label(), "skipped issue span");
                    }
                }
                outcome
            })
    }
}

/// Drops ASCII letters and spaces from the timestamp field.
fn strip_timestamp(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !(c.is_ascii_alphabetic() || *c == ' '))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::StimulationMarker;

    fn first_issue(doc: &Document) -> NodeRef<'_> {
        doc.elements_named("span")
            .find(|s| s.has_class("text-error") || s.has_class("text-fail"))
            .unwrap()
    }

    fn run(html: &str, stimulations: StimulationIndex) -> Classification {
        let doc = Document::parse(html).unwrap();
        let markup = MarkupConfig::default();
        let limits = ClassifierConfig::default();
        IssueClassifier::new(&markup, &limits).classify(first_issue(&doc), &stimulations)
    }

    #[test]
    fn test_four_fields() {
        let out = run(
            "<span class=\"text-error\">12:30:45 UTC|TC|check|05_LoadTest Voltage out of range</span>",
            StimulationIndex::default(),
        );
        let record = out.record().unwrap();
        assert_eq!(record.timestamp, "12:30:45");
        assert_eq!(record.message, "05_LoadTest Voltage out of range");
        assert_eq!(record.test_case, "05_LoadTest");
        assert_eq!(record.kind, IssueKind::Error);
        assert_eq!(record.stimulation, crate::constants::UNKNOWN_STIMULATION);
    }

    #[test]
    fn test_three_fields_failure() {
        let out = run(
            "<span class=\"text-fail\">T 09:00:01 |x| 123_Brake_Test: pressure low </span>",
            StimulationIndex::default(),
        );
        let record = out.record().unwrap();
        assert_eq!(record.kind, IssueKind::Failure);
        assert_eq!(record.message, "123_Brake_Test: pressure low");
        assert_eq!(record.timestamp, "09:00:01");
    }

    #[test]
    fn test_other_class_is_not_issue() {
        let out = run(
            "<span class=\"text-info\">a|b|c|05_X</span><span class=\"text-error\">x</span>",
            StimulationIndex::default(),
        );
        assert_eq!(out.skip_reason(), Some(SkipReason::TooFewFields { found: 1 }));

        let doc = Document::parse("<span class=\"text-info\">a|b|c|05_X</span>").unwrap();
        let markup = MarkupConfig::default();
        let limits = ClassifierConfig::default();
        let span = doc.elements_named("span").next().unwrap();
        let out = IssueClassifier::new(&markup, &limits).classify(span, &StimulationIndex::default());
        assert_eq!(out, Classification::Skipped(SkipReason::NotIssueClass));
    }

    #[test]
    fn test_too_few_fields() {
        let out = run("<span class=\"text-error\">only|two</span>", StimulationIndex::default());
        assert_eq!(out.skip_reason(), Some(SkipReason::TooFewFields { found: 2 }));
    }

    #[test]
    fn test_no_token_discarded() {
        let out = run(
            "<span class=\"text-error\">t|a|b|no identifier here</span>",
            StimulationIndex::default(),
        );
        assert_eq!(out.skip_reason(), Some(SkipReason::NoTestCaseToken));
    }

    #[test]
    fn test_token_outside_message_field_discarded() {
        let out = run(
            "<span class=\"text-error\">12:30:45 UTC|TC|05_LoadTest check|Voltage out of range</span>",
            StimulationIndex::default(),
        );
        assert_eq!(out.skip_reason(), Some(SkipReason::NoTestCaseToken));
    }

    #[test]
    fn test_comparison_in_message_keeps_siblings() {
        let html = "<p><span class=\"text-info\">set limit</span>\
                    <span class=\"text-error\">t|a|b|10_X value < 5</span>\
                    <span class=\"text-error\">next</span></p>";
        let record = run(html, StimulationIndex::default()).record().unwrap();
        assert_eq!(record.message, "10_X value < 5");
        assert_eq!(record.test_case, "10_X");
        assert_eq!(record.previous_actions, "set limit");
    }

    #[test]
    fn test_stimulation_from_line() {
        let html = "<div>\n\n\n</div>\n<span class=\"text-error\">t|a|b|07_Door open</span>";
        let index = StimulationIndex::new(vec![StimulationMarker::new("Doors", 2)]);
        assert_eq!(run(html, index).record().unwrap().stimulation, "Doors");
    }

    #[test]
    fn test_overlong_message_merges_error_siblings() {
        let long = format!("08_Long {}", "x".repeat(200));
        let html = format!(
            "<p><span class=\"text-error\">t|a|b|{long}</span>\
             <span class=\"text-error\">part two</span>\
             <span class=\"text-error\">part three</span>\
             <span class=\"text-fail\">not merged</span>\
             <span class=\"text-error\">after stop</span></p>"
        );
        let record = run(&html, StimulationIndex::default()).record().unwrap();
        assert_eq!(record.message, format!("{long} part two part three"));
    }

    #[test]
    fn test_short_message_not_merged() {
        let html = "<p><span class=\"text-error\">t|a|b|08_Short</span>\
                    <span class=\"text-error\">next</span></p>";
        let record = run(html, StimulationIndex::default()).record().unwrap();
        assert_eq!(record.message, "08_Short");
    }

    #[test]
    fn test_previous_actions_oldest_first() {
        let html = "<p><span class=\"text-info\">one</span>\
                    <span class=\"text-info\">two</span>\
                    <span class=\"text-debug\">noise</span>\
                    <span class=\"text-info\">three</span>\
                    <span class=\"text-info\">four</span>\
                    <span class=\"text-error\">t|a|b|09_Act</span></p>";
        let record = run(html, StimulationIndex::default()).record().unwrap();
        assert_eq!(record.previous_actions, "two; three; four");
    }
}

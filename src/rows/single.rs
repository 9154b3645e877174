// src/rows/single.rs
//! Issue, pass and warning tables of one analyzed document.

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use super::{collapse_labels, Cell, Table};
use crate::aggregate::{AnalysisMode, DocumentAnalysis, EventBucket};
use crate::classify::{IssueKind, IssueRecord};
use crate::multirun::normalize_message;
use crate::summary::{campaign_lines, Summary};

pub const ISSUES_TABLE: &str = "Issues";
pub const PASSES_TABLE: &str = "Passes";
pub const WARNINGS_TABLE: &str = "Warnings";

pub const ISSUE_COLUMNS: [&str; 9] = [
    "Test Case",
    "Type",
    "Stimulation",
    "Message",
    "Time",
    "Ticket",
    "Status",
    "Comments",
    "Previous Actions",
];

pub const EVENT_COLUMNS: [&str; 3] = ["Test Case", "Stimulation", "Message"];

/// Everything printed or written for one document.
#[derive(Debug, Clone, Serialize)]
pub struct SingleRunReport {
    pub mode: AnalysisMode,
    pub campaign: Vec<(String, String)>,
    pub summary: Summary,
    pub issues: Table,
    pub passes: Table,
    pub warnings: Table,
}

impl SingleRunReport {
    /// Tables in output order.
    #[must_use]
    pub fn tables(&self) -> [&Table; 3] {
        [&self.issues, &self.warnings, &self.passes]
    }
}

/// Builds the report tables.
///
/// Single-run reports shorten messages to the text after the first colon and
/// drop issues whose test case matches `excluded`. Cyclic reports keep raw
/// messages, drop exact duplicate issue rows, and count every retained pass
/// and warning in the summary.
#[must_use]
pub fn build_single_report(analysis: &DocumentAnalysis, excluded: &Regex) -> SingleRunReport {
    let mode = analysis.mode;
    let events = &analysis.events;
    let (issues, failures, errors) = issue_table(events.issue_records(), mode, excluded);
    let passes = event_table(PASSES_TABLE, &events.passes);
    let warnings = event_table(WARNINGS_TABLE, &events.warnings);

    let summary = match mode {
        AnalysisMode::SingleRun => Summary {
            passes: passes.len(),
            warnings: warnings.len(),
            failures,
            errors,
        },
        AnalysisMode::Cyclic => Summary {
            passes: events.passes.values().map(EventBucket::len).sum(),
            warnings: events.warnings.values().map(EventBucket::len).sum(),
            failures,
            errors,
        },
    };

    SingleRunReport {
        mode,
        campaign: campaign_lines(analysis.campaign.as_ref(), mode),
        summary,
        issues,
        passes,
        warnings,
    }
}

fn issue_table<'a>(
    records: impl Iterator<Item = &'a IssueRecord>,
    mode: AnalysisMode,
    excluded: &Regex,
) -> (Table, usize, usize) {
    let mut table = Table::new(ISSUES_TABLE, ISSUE_COLUMNS);
    let mut seen: HashSet<Vec<Cell>> = HashSet::new();
    let (mut failures, mut errors) = (0, 0);

    for record in records {
        let message = match mode {
            AnalysisMode::SingleRun => {
                if excluded.is_match(&record.test_case) {
                    continue;
                }
                normalize_message(&record.message)
            }
            AnalysisMode::Cyclic => record.message.as_str(),
        };
        let row = vec![
            Cell::text(record.test_case.as_str()),
            Cell::from(record.kind.label()),
            Cell::text(record.stimulation.as_str()),
            Cell::from(message),
            Cell::text(record.timestamp.as_str()),
            Cell::blank(),
            Cell::blank(),
            Cell::blank(),
            Cell::text(record.previous_actions.as_str()),
        ];
        if mode == AnalysisMode::Cyclic && !seen.insert(row.clone()) {
            continue;
        }
        match record.kind {
            IssueKind::Failure => failures += 1,
            IssueKind::Error => errors += 1,
        }
        table.push_row(row);
    }

    collapse_labels(&mut table.rows, 0);
    (table, failures, errors)
}

/// One row per distinct (test case, stimulation), buckets in first-insertion order.
fn event_table(name: &str, buckets: &IndexMap<String, EventBucket>) -> Table {
    let mut table = Table::new(name, EVENT_COLUMNS);
    for (stimulation, bucket) in buckets {
        for test_case in bucket.distinct_test_cases() {
            table.push_row(vec![
                Cell::from(test_case),
                Cell::text(stimulation.as_str()),
                Cell::blank(),
            ]);
        }
    }
    collapse_labels(&mut table.rows, 0);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{DocumentEvents, EventAggregator, Verdict};

    fn record(stim: &str, tc: &str, message: &str, kind: IssueKind) -> IssueRecord {
        IssueRecord {
            stimulation: stim.to_string(),
            test_case: tc.to_string(),
            message: message.to_string(),
            kind,
            timestamp: "10:00:00".to_string(),
            previous_actions: "open; close".to_string(),
        }
    }

    fn analysis(mode: AnalysisMode, build: impl FnOnce(&mut EventAggregator)) -> DocumentAnalysis {
        let mut agg = EventAggregator::new(mode.policy());
        build(&mut agg);
        DocumentAnalysis {
            mode,
            events: agg.finish(),
            campaign: None,
        }
    }

    fn excluded() -> Regex {
        Regex::new(r"^\d{2}_\d{2}$").unwrap()
    }

    #[test]
    fn test_single_run_issue_rows() {
        let a = analysis(AnalysisMode::SingleRun, |agg| {
            agg.record_issue(record("S1", "10_Door", "10_Door: stuck open", IssueKind::Error));
            agg.record_issue(record("S1", "12_34", "12_34: noise", IssueKind::Error));
            agg.record_issue(record("S2", "10_Door", "10_Door: late", IssueKind::Failure));
        });
        let report = build_single_report(&a, &excluded());
        assert_eq!(report.issues.columns, ISSUE_COLUMNS);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues.rows[0][0], Cell::text("10_Door"));
        assert_eq!(report.issues.rows[0][3], Cell::text("stuck open"));
        assert!(report.issues.rows[1][0].is_blank());
        assert_eq!(report.issues.rows[1][2], Cell::text("S2"));
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.failures, 1);
    }

    #[test]
    fn test_cyclic_keeps_raw_and_dedupes_rows() {
        let a = analysis(AnalysisMode::Cyclic, |agg| {
            agg.record_issue(record("S1", "12_34", "12_34: noise", IssueKind::Error));
            agg.record_issue(record("S1", "12_34", "12_34: noise", IssueKind::Error));
            agg.record_event(Verdict::Pass, "S1", "10_A");
            agg.record_event(Verdict::Pass, "S1", "10_A");
            agg.record_event(Verdict::Pass, "S1", "10_B");
        });
        let report = build_single_report(&a, &excluded());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues.rows[0][3], Cell::text("12_34: noise"));
        assert_eq!(report.passes.len(), 2);
        assert_eq!(report.summary.passes, 3);
        assert_eq!(report.summary.errors, 1);
    }

    #[test]
    fn test_empty_document() {
        let a = DocumentAnalysis {
            mode: AnalysisMode::SingleRun,
            events: DocumentEvents::default(),
            campaign: None,
        };
        let report = build_single_report(&a, &excluded());
        assert!(report.issues.is_empty());
        assert_eq!(report.summary.total(), 0);
        assert_eq!(report.campaign.len(), 6);
    }
}

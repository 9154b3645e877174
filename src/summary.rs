// src/summary.rs
//! Per-run category counts and the campaign lines printed above them.

use serde::Serialize;

use crate::aggregate::AnalysisMode;
use crate::campaign::CampaignTable;
use crate::constants::{
    KEY_CAMPAIGN_DATE, KEY_CAMPAIGN_NAME, KEY_DURATION, KEY_ENNA_VERSION, KEY_PYTHON_VERSION,
    KEY_TRAIN, NOT_AVAILABLE,
};
use crate::rows::{Cell, Table};

pub const SUMMARY_TABLE: &str = "Summary";

/// (label, campaign table key) of every summary metadata line.
const CAMPAIGN_INFO: [(&str, &str); 6] = [
    ("Campaign Name", KEY_CAMPAIGN_NAME),
    ("Campaign Date", KEY_CAMPAIGN_DATE),
    ("Duration", KEY_DURATION),
    ("ENNA Version", KEY_ENNA_VERSION),
    ("Python Version", KEY_PYTHON_VERSION),
    ("Train", KEY_TRAIN),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passes: usize,
    pub warnings: usize,
    pub failures: usize,
    pub errors: usize,
}

impl Summary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.passes + self.warnings + self.failures + self.errors
    }

    /// Categories in presentation order.
    #[must_use]
    pub fn categories(&self) -> [(&'static str, usize); 4] {
        [
            ("Passes", self.passes),
            ("Warnings", self.warnings),
            ("Failures", self.failures),
            ("Errors", self.errors),
        ]
    }

    /// Percentage of the total, 0.0 for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn share(&self, count: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        }
    }

    #[must_use]
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(SUMMARY_TABLE, ["Category", "Count", "Share"]);
        for (label, count) in self.categories() {
            table.push_row(vec![
                Cell::from(label),
                Cell::Count(count),
                Cell::Text(format!("{:.1}%", self.share(count))),
            ]);
        }
        table
    }
}

/// Campaign lines for the summary. Cyclic reports list only keys that are
/// present; single-run reports list every key, `N/A` when absent.
#[must_use]
pub fn campaign_lines(table: Option<&CampaignTable>, mode: AnalysisMode) -> Vec<(String, String)> {
    CAMPAIGN_INFO
        .iter()
        .filter_map(|(label, key)| {
            let value = table.and_then(|t| t.get(key));
            match (mode, value) {
                (_, Some(v)) => Some(((*label).to_string(), v.to_string())),
                (AnalysisMode::SingleRun, None) => {
                    Some(((*label).to_string(), NOT_AVAILABLE.to_string()))
                }
                (AnalysisMode::Cyclic, None) => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares() {
        let summary = Summary {
            passes: 3,
            warnings: 1,
            failures: 0,
            errors: 4,
        };
        assert_eq!(summary.total(), 8);
        assert!((summary.share(3) - 37.5).abs() < f64::EPSILON);
        let table = summary.to_table();
        assert_eq!(table.rows[0][2], Cell::text("37.5%"));
        assert_eq!(table.rows[3][2], Cell::text("50.0%"));
    }

    #[test]
    fn test_empty_share_is_zero() {
        assert!(Summary::default().share(0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_campaign_lines_by_mode() {
        let table = CampaignTable::from_entries(vec![
            ("Campaign date".to_string(), "2024-03-01 10:00".to_string()),
            ("Train".to_string(), "T7".to_string()),
        ]);
        let single = campaign_lines(Some(&table), AnalysisMode::SingleRun);
        assert_eq!(single.len(), 6);
        assert_eq!(single[0], ("Campaign Name".to_string(), NOT_AVAILABLE.to_string()));
        assert_eq!(single[1].1, "2024-03-01 10:00");

        let cyclic = campaign_lines(Some(&table), AnalysisMode::Cyclic);
        let labels: Vec<&str> = cyclic.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Campaign Date", "Train"]);
    }
}

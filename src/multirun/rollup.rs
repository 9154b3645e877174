// src/multirun/rollup.rs
//! Pass/fail/error/warning counts per test case per run date.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::{NAME_LABEL, VALUATION_LABEL, VERDICT_BLOCK_ATTR};
use crate::document::{Document, NodeRef};

/// Counters for one (test case, date) pair. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PerTestCaseDateCounts {
    pub pass: usize,
    pub fail: usize,
    pub error: usize,
    pub warning: usize,
    pub total: usize,
}

impl PerTestCaseDateCounts {
    /// Folds one verdict. Unrecognized verdicts only count toward `total`.
    pub fn record(&mut self, verdict: &str) {
        self.total += 1;
        match verdict.to_uppercase().as_str() {
            "PASS" => self.pass += 1,
            "FAIL" => self.fail += 1,
            "ERROR" => self.error += 1,
            "WARNING" => self.warning += 1,
            _ => {}
        }
    }

    /// Verdicts that matched none of the four recognized values.
    #[must_use]
    pub fn unrecognized(&self) -> usize {
        self.total - self.pass - self.fail - self.error - self.warning
    }

    pub fn absorb(&mut self, other: &Self) {
        self.pass += other.pass;
        self.fail += other.fail;
        self.error += other.error;
        self.warning += other.warning;
        self.total += other.total;
    }
}

/// One `(test case, verdict)` pair read from a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictPair {
    pub test_case: String,
    pub verdict: String,
}

/// Reads every verdict block: an element with `name="test"` followed in
/// document order by `<b>Name</b>` and `<b>Valuation</b>` labels.
#[must_use]
pub fn extract_verdicts(doc: &Document) -> Vec<VerdictPair> {
    let (attr, value) = VERDICT_BLOCK_ATTR;
    doc.elements()
        .filter(|el| el.attr(attr) == Some(value))
        .filter_map(|block| {
            let name = label_value(&block, NAME_LABEL)?;
            let verdict = label_value(&block, VALUATION_LABEL)?.to_uppercase();
            if name.is_empty() {
                return None;
            }
            Some(VerdictPair {
                test_case: name,
                verdict,
            })
        })
        .collect()
}

fn label_value(block: &NodeRef<'_>, label: &str) -> Option<String> {
    let tag = block.find_next(|n| n.is("b") && n.stripped_text() == label)?;
    let raw = tag.next_sibling_text()?;
    Some(raw.trim().replace(':', "").trim().to_string())
}

/// Cross-run verdict counts. Test cases keep first-seen order; dates sort.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerdictRollup {
    results: IndexMap<String, IndexMap<String, PerTestCaseDateCounts>>,
    dates: BTreeSet<String>,
}

impl VerdictRollup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a run date even when the run carried no verdicts.
    pub fn add_date(&mut self, date: &str) {
        if !self.dates.contains(date) {
            self.dates.insert(date.to_string());
        }
    }

    pub fn fold(&mut self, date: &str, pair: &VerdictPair) {
        self.add_date(date);
        self.results
            .entry(pair.test_case.clone())
            .or_default()
            .entry(date.to_string())
            .or_default()
            .record(&pair.verdict);
    }

    /// Sorted run dates.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.dates.iter().map(String::as_str)
    }

    #[must_use]
    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    /// Test cases in first-seen order with their per-date counts.
    pub fn test_cases(
        &self,
    ) -> impl Iterator<Item = (&str, &IndexMap<String, PerTestCaseDateCounts>)> {
        self.results.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn counts(&self, test_case: &str, date: &str) -> Option<&PerTestCaseDateCounts> {
        self.results.get(test_case)?.get(date)
    }

    /// Sum over every date of one test case.
    #[must_use]
    pub fn totals(&self, test_case: &str) -> PerTestCaseDateCounts {
        let mut sum = PerTestCaseDateCounts::default();
        if let Some(per_date) = self.results.get(test_case) {
            for counts in per_date.values() {
                sum.absorb(counts);
            }
        }
        sum
    }

    /// Sum over every test case of one date.
    #[must_use]
    pub fn date_totals(&self, date: &str) -> PerTestCaseDateCounts {
        let mut sum = PerTestCaseDateCounts::default();
        for per_date in self.results.values() {
            if let Some(counts) = per_date.get(date) {
                sum.absorb(counts);
            }
        }
        sum
    }

    /// Per date, the test cases counted as failed (fail or error seen) and
    /// passed (otherwise, at least one pass).
    #[must_use]
    pub fn date_outcomes(&self, date: &str) -> DateOutcome {
        let mut outcome = DateOutcome::default();
        for (test_case, per_date) in &self.results {
            let Some(counts) = per_date.get(date) else {
                continue;
            };
            if counts.fail > 0 || counts.error > 0 {
                outcome.failed.push(test_case.clone());
            } else if counts.pass > 0 {
                outcome.passed.push(test_case.clone());
            }
        }
        outcome
    }
}

/// Passed and failed scripts of one run date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateOutcome {
    pub passed: Vec<String>,
    pub failed: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(tc: &str, verdict: &str) -> VerdictPair {
        VerdictPair {
            test_case: tc.to_string(),
            verdict: verdict.to_string(),
        }
    }

    #[test]
    fn test_counts_and_unrecognized() {
        let mut counts = PerTestCaseDateCounts::default();
        for v in ["pass", "FAIL", "Error", "warning", "skipped"] {
            counts.record(v);
        }
        assert_eq!(counts.pass, 1);
        assert_eq!(counts.fail, 1);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.unrecognized(), 1);
    }

    #[test]
    fn test_extract_verdicts() {
        let html = r#"<div name="test"><p><b>Name</b>: TC_A</p><p><b>Valuation</b>: pass</p></div>
<div name="test"><p><b>Name</b>:  </p><p><b>Valuation</b>: FAIL</p></div>
<div name="test"><p><b>Name</b>: TC_B</p><p><b>Valuation</b>: Fail</p></div>"#;
        let doc = Document::parse(html).unwrap();
        let pairs = extract_verdicts(&doc);
        assert_eq!(pairs, vec![pair("TC_A", "PASS"), pair("TC_B", "FAIL")]);
    }

    #[test]
    fn test_order_independent_counts() {
        let mut forward = VerdictRollup::new();
        forward.fold("2024-01-01", &pair("TC_A", "PASS"));
        forward.fold("2024-01-02", &pair("TC_A", "FAIL"));
        forward.fold("2024-01-02", &pair("TC_B", "PASS"));

        let mut backward = VerdictRollup::new();
        backward.fold("2024-01-02", &pair("TC_B", "PASS"));
        backward.fold("2024-01-02", &pair("TC_A", "FAIL"));
        backward.fold("2024-01-01", &pair("TC_A", "PASS"));

        for tc in ["TC_A", "TC_B"] {
            assert_eq!(forward.totals(tc), backward.totals(tc));
        }
        assert_eq!(
            forward.dates().collect::<Vec<_>>(),
            backward.dates().collect::<Vec<_>>()
        );
        assert_eq!(forward.date_totals("2024-01-02").total, 2);
    }

    #[test]
    fn test_date_outcomes() {
        let mut rollup = VerdictRollup::new();
        rollup.fold("d1", &pair("TC_A", "PASS"));
        rollup.fold("d1", &pair("TC_B", "PASS"));
        rollup.fold("d1", &pair("TC_B", "ERROR"));
        rollup.fold("d1", &pair("TC_C", "WARNING"));
        let outcome = rollup.date_outcomes("d1");
        assert_eq!(outcome.passed, vec!["TC_A"]);
        assert_eq!(outcome.failed, vec!["TC_B"]);
    }
}

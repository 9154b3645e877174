// src/multirun/mod.rs
//! Cross-run statistics.
//!
//! Each document is indexed and extracted on its own (in parallel); the
//! extracts are then folded into the accumulators one at a time, in input
//! order. Only [`MultiRunAggregator`] writes to the accumulators.

pub mod frequency;
pub mod rollup;

pub use frequency::{normalize_message, MessageFrequency, MessageFrequencyEntry};
pub use rollup::{extract_verdicts, DateOutcome, PerTestCaseDateCounts, VerdictPair, VerdictRollup};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use regex::Regex;
use serde::Serialize;

use crate::campaign::{self, CampaignDetails, CampaignSource};
use crate::classify::{Classification, IssueClassifier, IssueRecord};
use crate::config::Config;
use crate::document::Document;
use crate::error::{Result, StimtraceError};
use crate::resolve::ProximityResolver;

/// Everything the cross-run views need from one document.
#[derive(Debug, Clone)]
pub struct RunExtract {
    pub path: PathBuf,
    pub date: String,
    pub details: CampaignDetails,
    pub verdicts: Vec<VerdictPair>,
    pub issues: Vec<IssueRecord>,
}

/// Indexes one report and pulls out its date, details, verdicts and issues.
///
/// # Errors
/// Returns error if the file is unreadable or its markup is unrecoverable.
pub fn extract_run(path: &Path, config: &Config) -> Result<RunExtract> {
    let doc = Document::load(path)?;
    let markup = &config.markup;

    let table = campaign::extract_table(&doc, CampaignSource::ActiveContent, markup);
    let date = campaign::run_date(table.as_ref());
    let details = CampaignDetails::from_table(path, table.as_ref());

    let resolver = ProximityResolver::from_document(&doc, markup);
    let classifier = IssueClassifier::new(markup, &config.classifier);
    let issues = classifier
        .classify_document(&doc, resolver.stimulations())
        .filter_map(Classification::record)
        .collect();

    Ok(RunExtract {
        path: path.to_path_buf(),
        date,
        details,
        verdicts: extract_verdicts(&doc),
        issues,
    })
}

/// A document that could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a multi-document run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub verdicts: VerdictRollup,
    pub frequency: MessageFrequency,
    /// Details per run date; the last document processed for a date wins.
    pub campaigns: BTreeMap<String, CampaignDetails>,
    pub documents: usize,
    pub failures: Vec<DocumentFailure>,
    pub duration_ms: u128,
}

impl BatchReport {
    /// Sorted run dates of every folded document.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.verdicts.dates()
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Single writer for the cross-run accumulators.
#[derive(Debug)]
pub struct MultiRunAggregator {
    verdicts: VerdictRollup,
    frequency: MessageFrequency,
    campaigns: BTreeMap<String, CampaignDetails>,
    documents: usize,
}

impl MultiRunAggregator {
    #[must_use]
    pub fn new(excluded_test_cases: Regex) -> Self {
        Self {
            verdicts: VerdictRollup::new(),
            frequency: MessageFrequency::new(excluded_test_cases),
            campaigns: BTreeMap::new(),
            documents: 0,
        }
    }

    pub fn fold(&mut self, run: RunExtract) {
        self.verdicts.add_date(&run.date);
        for pair in &run.verdicts {
            self.verdicts.fold(&run.date, pair);
        }
        let mut counted = 0;
        for record in &run.issues {
            if self.frequency.fold(&run.date, record) {
                counted += 1;
            }
        }
        tracing::info!(
            path = %run.path.display(),
            date = %run.date,
            verdicts = run.verdicts.len(),
            issues = counted,
            "folded run"
        );
        self.campaigns.insert(run.date, run.details);
        self.documents += 1;
    }

    #[must_use]
    pub fn finish(self, failures: Vec<DocumentFailure>, started: Instant) -> BatchReport {
        BatchReport {
            verdicts: self.verdicts,
            frequency: self.frequency,
            campaigns: self.campaigns,
            documents: self.documents,
            failures,
            duration_ms: started.elapsed().as_millis(),
        }
    }
}

/// Processes a batch of report files.
///
/// Documents that fail to load are listed in [`BatchReport::failures`] and
/// contribute nothing.
///
/// # Errors
/// Returns error if `paths` is empty, no document could be processed, or the
/// exclusion pattern is invalid.
pub fn analyze_batch(paths: &[PathBuf], config: &Config) -> Result<BatchReport> {
    if paths.is_empty() {
        return Err(StimtraceError::NoDocuments);
    }
    let started = Instant::now();
    let mut aggregator = MultiRunAggregator::new(config.excluded_test_cases()?);

    let extracts: Vec<(&PathBuf, Result<RunExtract>)> = paths
        .par_iter()
        .map(|path| (path, extract_run(path, config)))
        .collect();

    let mut failures = Vec::new();
    for (path, extract) in extracts {
        match extract {
            Ok(run) => aggregator.fold(run),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping document");
                failures.push(DocumentFailure {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if failures.len() == paths.len() {
        return Err(StimtraceError::NoDocuments);
    }
    let report = aggregator.finish(failures, started);
    tracing::info!(
        documents = report.documents,
        failures = report.failures.len(),
        dates = report.verdicts.date_count(),
        messages = report.frequency.len(),
        "batch complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::IssueKind;

    fn run(date: &str, verdicts: &[(&str, &str)], issues: Vec<IssueRecord>) -> RunExtract {
        RunExtract {
            path: PathBuf::from(format!("BENCH_{date}.html")),
            date: date.to_string(),
            details: CampaignDetails::from_table(Path::new("BENCH.html"), None),
            verdicts: verdicts
                .iter()
                .map(|(tc, v)| VerdictPair {
                    test_case: (*tc).to_string(),
                    verdict: (*v).to_string(),
                })
                .collect(),
            issues,
        }
    }

    #[test]
    fn test_fold_runs() {
        let issue = IssueRecord {
            stimulation: "S".to_string(),
            test_case: "10_Brake".to_string(),
            message: "10_Brake: low pressure".to_string(),
            kind: IssueKind::Failure,
            timestamp: String::new(),
            previous_actions: String::new(),
        };
        let mut agg = MultiRunAggregator::new(Regex::new(r"^\d{2}_\d{2}$").unwrap());
        agg.fold(run("2024-01-01", &[("TC_A", "PASS")], vec![issue.clone()]));
        agg.fold(run("2024-01-02", &[("TC_A", "FAIL")], vec![issue]));
        let report = agg.finish(Vec::new(), Instant::now());

        assert_eq!(report.documents, 2);
        assert_eq!(report.dates().collect::<Vec<_>>(), vec!["2024-01-01", "2024-01-02"]);
        let totals = report.verdicts.totals("TC_A");
        assert_eq!((totals.pass, totals.fail, totals.total), (1, 1, 2));
        assert_eq!(report.frequency.get("low pressure").unwrap().occurrences, 2);
        assert_eq!(report.campaigns.len(), 2);
        assert!(!report.is_partial());
    }

    #[test]
    fn test_empty_batch_rejected() {
        let err = analyze_batch(&[], &Config::default()).unwrap_err();
        assert!(matches!(err, StimtraceError::NoDocuments));
    }

    #[test]
    fn test_all_missing_is_no_documents() {
        let paths = vec![PathBuf::from("/nonexistent/stimtrace/a.html")];
        let err = analyze_batch(&paths, &Config::default()).unwrap_err();
        assert!(matches!(err, StimtraceError::NoDocuments));
    }
}

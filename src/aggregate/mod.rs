// src/aggregate/mod.rs
//! Event aggregation for one document.
//!
//! Walks every valuation block and issue span, resolves ownership, and files
//! the events into per-stimulation buckets under a duplicate policy. The
//! aggregator owns its buckets until [`EventAggregator::finish`] hands them
//! over as a [`DocumentEvents`].

pub mod bucket;

pub use bucket::{EventBucket, EventEntry, IssueBucket};

use indexmap::IndexMap;
use serde::Serialize;

use crate::campaign::{self, CampaignSource, CampaignTable};
use crate::classify::{Classification, IssueClassifier, IssueKind, IssueRecord};
use crate::config::Config;
use crate::constants::{PASS_KEYWORD, VALUATION, WARNING_KEYWORD};
use crate::document::Document;
use crate::resolve::ProximityResolver;

/// How repeated events are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuplicatePolicy {
    /// Every occurrence is kept; used for cyclic (repeated) runs.
    RetainAll,
    /// A test case is recorded once per stimulation; used for single runs.
    CollapseOnTestCase,
}

/// Which single-document analysis is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisMode {
    SingleRun,
    Cyclic,
}

impl AnalysisMode {
    #[must_use]
    pub fn policy(self) -> DuplicatePolicy {
        match self {
            Self::SingleRun => DuplicatePolicy::CollapseOnTestCase,
            Self::Cyclic => DuplicatePolicy::RetainAll,
        }
    }
}

/// Which content bucket a valuation keyword feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Warning,
}

impl Verdict {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Pass => PASS_KEYWORD,
            Self::Warning => WARNING_KEYWORD,
        }
    }
}

/// Buckets for one document, keyed by stimulation in first-insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentEvents {
    pub passes: IndexMap<String, EventBucket>,
    pub warnings: IndexMap<String, EventBucket>,
    pub issues: IndexMap<String, IssueBucket>,
}

impl DocumentEvents {
    pub fn issue_records(&self) -> impl Iterator<Item = &IssueRecord> {
        self.issues.values().flat_map(IssueBucket::records)
    }

    #[must_use]
    pub fn issue_count(&self, kind: IssueKind) -> usize {
        self.issue_records().filter(|r| r.kind == kind).count()
    }
}

/// Files events into buckets under one duplicate policy.
#[derive(Debug, Clone)]
pub struct EventAggregator {
    policy: DuplicatePolicy,
    events: DocumentEvents,
}

impl EventAggregator {
    #[must_use]
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            events: DocumentEvents::default(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Records a pass or warning event. Returns whether it was kept.
    pub fn record_event(&mut self, verdict: Verdict, stimulation: &str, test_case: &str) -> bool {
        let target = match verdict {
            Verdict::Pass => &mut self.events.passes,
            Verdict::Warning => &mut self.events.warnings,
        };
        let keep = match self.policy {
            DuplicatePolicy::RetainAll => true,
            DuplicatePolicy::CollapseOnTestCase => target
                .get(stimulation)
                .map_or(true, |bucket| !bucket.contains_test_case(test_case)),
        };
        if keep {
            target
                .entry(stimulation.to_string())
                .or_insert_with(|| EventBucket::new(stimulation))
                .push(EventEntry {
                    stimulation: stimulation.to_string(),
                    test_case: test_case.to_string(),
                });
        }
        keep
    }

    /// Records an issue. Returns whether it was kept.
    pub fn record_issue(&mut self, record: IssueRecord) -> bool {
        let bucket = self
            .events
            .issues
            .entry(record.stimulation.clone())
            .or_insert_with(|| IssueBucket::new(record.stimulation.clone()));
        if self.policy == DuplicatePolicy::CollapseOnTestCase
            && bucket.contains_test_case(&record.test_case)
        {
            return false;
        }
        bucket.push(record);
        true
    }

    /// Scans every content block for one valuation keyword.
    pub fn scan_valuations(
        &mut self,
        doc: &Document,
        resolver: &ProximityResolver,
        content_class: &str,
        verdict: Verdict,
    ) {
        let keyword = verdict.keyword();
        for div in doc.elements_named("div").filter(|d| d.has_class(content_class)) {
            let text = div.text();
            if !(text.contains(VALUATION) && text.contains(keyword)) {
                continue;
            }
            let line = div.line();
            self.record_event(verdict, resolver.stimulation(line), resolver.test_case(line));
        }
    }

    /// Hands over the buckets; collapse mode reduces them to distinct events.
    #[must_use]
    pub fn finish(mut self) -> DocumentEvents {
        if self.policy == DuplicatePolicy::CollapseOnTestCase {
            for bucket in self
                .events
                .passes
                .values_mut()
                .chain(self.events.warnings.values_mut())
            {
                bucket.collapse();
            }
        }
        self.events
    }
}

/// Everything a single-run report needs from one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub mode: AnalysisMode,
    pub events: DocumentEvents,
    pub campaign: Option<CampaignTable>,
}

/// Runs the full single-document pass: markers, issues, valuations, campaign table.
#[must_use]
pub fn analyze_document(doc: &Document, mode: AnalysisMode, config: &Config) -> DocumentAnalysis {
    let markup = &config.markup;
    let resolver = ProximityResolver::from_document(doc, markup);
    let classifier = IssueClassifier::new(markup, &config.classifier);
    let mut aggregator = EventAggregator::new(mode.policy());

    for outcome in classifier.classify_document(doc, resolver.stimulations()) {
        if let Classification::Record(record) = outcome {
            aggregator.record_issue(record);
        }
    }

    aggregator.scan_valuations(doc, &resolver, &markup.content_class, Verdict::Pass);
    aggregator.scan_valuations(doc, &resolver, &markup.content_class, Verdict::Warning);

    let events = aggregator.finish();
    tracing::debug!(
        stimulations = resolver.stimulation_markers().len(),
        test_cases = resolver.test_case_markers().len(),
        issues = events.issue_records().count(),
        "aggregated document events"
    );

    DocumentAnalysis {
        mode,
        events,
        campaign: campaign::extract_table(doc, CampaignSource::CampaignTab, markup),
    }
}

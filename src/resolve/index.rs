// src/resolve/index.rs
//! Line-ownership indexes over markers.
//!
//! Stimulations own the half-open line range after their header up to and
//! including the next header's line, so lookup is a binary search on the
//! sorted header lines. Test cases are point labels: the nearest one by
//! absolute distance wins, the earlier one on a tie.

use super::markers::{StimulationMarker, TestCaseMarker};
use crate::constants::{UNKNOWN_STIMULATION, UNKNOWN_TEST_CASE};

/// Closest preceding stimulation marker, by linear backward scan.
#[must_use]
pub fn resolve_stimulation(markers: &[StimulationMarker], reference_line: usize) -> &str {
    markers
        .iter()
        .rev()
        .find(|m| m.line < reference_line)
        .map_or(UNKNOWN_STIMULATION, |m| m.name.as_str())
}

/// Test-case marker with the minimum absolute line distance, by linear scan.
#[must_use]
pub fn resolve_test_case(markers: &[TestCaseMarker], reference_line: usize) -> &str {
    let mut best = UNKNOWN_TEST_CASE;
    let mut min_distance = usize::MAX;
    for m in markers {
        let distance = m.line.abs_diff(reference_line);
        if distance < min_distance {
            best = m.name.as_str();
            min_distance = distance;
        }
    }
    best
}

/// Interval index over stimulation markers.
#[derive(Debug, Clone, Default)]
pub struct StimulationIndex {
    markers: Vec<StimulationMarker>,
}

impl StimulationIndex {
    #[must_use]
    pub fn new(mut markers: Vec<StimulationMarker>) -> Self {
        markers.sort_by_key(|m| m.line);
        Self { markers }
    }

    #[must_use]
    pub fn markers(&self) -> &[StimulationMarker] {
        &self.markers
    }

    /// Name of the last marker whose line is strictly before `line`.
    #[must_use]
    pub fn resolve(&self, line: usize) -> &str {
        let owners = self.markers.partition_point(|m| m.line < line);
        owners
            .checked_sub(1)
            .and_then(|i| self.markers.get(i))
            .map_or(UNKNOWN_STIMULATION, |m| m.name.as_str())
    }
}

/// Sorted index over test-case markers.
#[derive(Debug, Clone, Default)]
pub struct TestCaseIndex {
    markers: Vec<TestCaseMarker>,
}

impl TestCaseIndex {
    #[must_use]
    pub fn new(mut markers: Vec<TestCaseMarker>) -> Self {
        markers.sort_by_key(|m| m.line);
        Self { markers }
    }

    #[must_use]
    pub fn markers(&self) -> &[TestCaseMarker] {
        &self.markers
    }

    /// First marker sitting on `line`.
    fn first_on_line(&self, line: usize) -> Option<&TestCaseMarker> {
        self.markers
            .get(self.markers.partition_point(|m| m.line < line))
    }

    /// Name of the nearest marker; ties go to the earlier marker.
    #[must_use]
    pub fn resolve(&self, line: usize) -> &str {
        let split = self.markers.partition_point(|m| m.line < line);
        let before = split
            .checked_sub(1)
            .and_then(|i| self.markers.get(i))
            .and_then(|m| self.first_on_line(m.line));
        let after = self.markers.get(split);

        let nearest = match (before, after) {
            (Some(b), Some(a)) if line - b.line <= a.line - line => Some(b),
            (_, Some(a)) => Some(a),
            (Some(b), None) => Some(b),
            (None, None) => None,
        };
        nearest.map_or(UNKNOWN_TEST_CASE, |m| m.name.as_str())
    }
}

/// Both indexes for one document.
#[derive(Debug, Clone, Default)]
pub struct ProximityResolver {
    stimulations: StimulationIndex,
    test_cases: TestCaseIndex,
}

impl ProximityResolver {
    #[must_use]
    pub fn new(stimulations: Vec<StimulationMarker>, test_cases: Vec<TestCaseMarker>) -> Self {
        Self {
            stimulations: StimulationIndex::new(stimulations),
            test_cases: TestCaseIndex::new(test_cases),
        }
    }

    #[must_use]
    pub fn stimulation(&self, line: usize) -> &str {
        self.stimulations.resolve(line)
    }

    #[must_use]
    pub fn test_case(&self, line: usize) -> &str {
        self.test_cases.resolve(line)
    }

    #[must_use]
    pub fn stimulations(&self) -> &StimulationIndex {
        &self.stimulations
    }

    #[must_use]
    pub fn stimulation_markers(&self) -> &[StimulationMarker] {
        self.stimulations.markers()
    }

    #[must_use]
    pub fn test_case_markers(&self) -> &[TestCaseMarker] {
        self.test_cases.markers()
    }
}

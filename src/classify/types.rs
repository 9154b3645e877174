// src/classify/types.rs
use serde::{Deserialize, Serialize};

/// Severity of a classified issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    Error,
    Failure,
}

impl IssueKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Failure => "Failure",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One error or failure event with its reconstructed context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    pub stimulation: String,
    pub test_case: String,
    pub message: String,
    pub kind: IssueKind,
    pub timestamp: String,
    pub previous_actions: String,
}

/// Why a node did not produce an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// First class token is neither the error nor the failure class.
    NotIssueClass,
    /// Fewer than three `|`-delimited fields.
    TooFewFields { found: usize },
    /// No `NN_name` token in the message, so it cannot be attributed.
    NoTestCaseToken,
}

impl SkipReason {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotIssueClass => "not-issue-class",
            Self::TooFewFields { .. } => "too-few-fields",
            Self::NoTestCaseToken => "no-test-case-token",
        }
    }
}

/// Outcome of classifying one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Record(IssueRecord),
    Skipped(SkipReason),
}

impl Classification {
    #[must_use]
    pub fn record(self) -> Option<IssueRecord> {
        match self {
            Self::Record(r) => Some(r),
            Self::Skipped(_) => None,
        }
    }

    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Record(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

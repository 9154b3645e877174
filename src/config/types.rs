use serde::{Deserialize, Serialize};

/// Class and attribute names the extractors look for in report markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Marker class on stimulation and test-case headers. Default: "title"
    pub title_class: String,
    /// Second marker class on test-case headers. Default: "test"
    pub test_class: String,
    /// Label class nested in stimulation headers. Default: "highlight"
    pub highlight_class: String,
    /// Class on pass/warning valuation blocks. Default: "content"
    pub content_class: String,
    /// First class of error spans. Default: "text-error"
    pub error_class: String,
    /// First class of failure spans. Default: "text-fail"
    pub failure_class: String,
    /// Class of informational spans used as previous actions. Default: "text-info"
    pub info_class: String,
    /// Extra class on the visible campaign section in multi-run reports. Default: "active"
    pub active_class: String,
    /// `data-tab` value of the campaign section in single-run reports. Default: "campaign"
    pub campaign_tab: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            title_class: "title".to_string(),
            test_class: "test".to_string(),
            highlight_class: "highlight".to_string(),
            content_class: "content".to_string(),
            error_class: "text-error".to_string(),
            failure_class: "text-fail".to_string(),
            info_class: "text-info".to_string(),
            active_class: "active".to_string(),
            campaign_tab: "campaign".to_string(),
        }
    }
}

impl MarkupConfig {
    fn names(&self) -> [(&'static str, &str); 9] {
        [
            ("title_class", self.title_class.as_str()),
            ("test_class", self.test_class.as_str()),
            ("highlight_class", self.highlight_class.as_str()),
            ("content_class", self.content_class.as_str()),
            ("error_class", self.error_class.as_str()),
            ("failure_class", self.failure_class.as_str()),
            ("info_class", self.info_class.as_str()),
            ("active_class", self.active_class.as_str()),
            ("campaign_tab", self.campaign_tab.as_str()),
        ]
    }

    /// Returns the first empty or whitespace-bearing name, if any.
    #[must_use]
    pub fn invalid_name(&self) -> Option<&'static str> {
        self.names()
            .into_iter()
            .find(|(_, v)| v.is_empty() || v.chars().any(char::is_whitespace))
            .map(|(k, _)| k)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Messages longer than this pull in following error spans. Default: 200
    pub continuation_threshold: usize,
    /// Maximum informational spans kept as previous actions. Default: 3
    pub previous_actions_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            continuation_threshold: default_continuation_threshold(),
            previous_actions_limit: default_previous_actions_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollupConfig {
    /// Test-case names matching this are dropped from issue tables. Default: `^\d{2}_\d{2}$`
    pub excluded_test_case_pattern: String,
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            excluded_test_case_pattern: default_excluded_pattern(),
        }
    }
}

/// Top-level layout of `stimtrace.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub markup: MarkupConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub rollup: RollupConfig,
}

const fn default_continuation_threshold() -> usize { 200 }
const fn default_previous_actions_limit() -> usize { 3 }
fn default_excluded_pattern() -> String { r"^\d{2}_\d{2}$".to_string() }

// src/constants.rs
//! Sentinels, keywords and field names shared by extractors and report builders.

/// Stimulation name when no marker precedes an event.
pub const UNKNOWN_STIMULATION: &str = "Unknown Stimulation";
/// Test-case name when a document has no test-case markers.
pub const UNKNOWN_TEST_CASE: &str = "Unknown Test Case";
/// Run date when the campaign table has no usable `Campaign date`.
pub const UNKNOWN_DATE: &str = "Unknown Date";
/// Default for any missing campaign detail.
pub const UNKNOWN: &str = "Unknown";

/// Token every pass/warning content block carries.
pub const VALUATION: &str = "Valuation";
/// Case-sensitive keyword of a passing content block.
pub const PASS_KEYWORD: &str = "PASS";
/// Case-sensitive keyword of a warning content block.
pub const WARNING_KEYWORD: &str = "WARNING";

/// Field delimiter inside issue text.
pub const ISSUE_DELIMITER: char = '|';
/// Separator between previous-action entries.
pub const ACTION_SEPARATOR: &str = "; ";

/// Labels of the verdict block in multi-run reports.
pub const NAME_LABEL: &str = "Name";
pub const VALUATION_LABEL: &str = VALUATION;
/// Attribute marking a verdict block (`name="test"`).
pub const VERDICT_BLOCK_ATTR: (&str, &str) = ("name", "test");

/// Campaign table keys.
pub const KEY_CAMPAIGN_NAME: &str = "Campaign name";
pub const KEY_CAMPAIGN_DATE: &str = "Campaign date";
pub const KEY_DURATION: &str = "Duration";
pub const KEY_ENNA_VERSION: &str = "ENNA version";
pub const KEY_PYTHON_VERSION: &str = "Python version";
pub const KEY_TRAIN: &str = "Train";

/// Testbench ids are the first characters of the report file name.
pub const TESTBENCH_ID_LEN: usize = 5;

/// Extensions picked up when a directory is given.
pub const REPORT_EXTENSIONS: &[&str] = &["html", "htm"];

/// Placeholder for an empty cross-run cell.
pub const NO_DATA: &str = "--";
/// Placeholder for a summary field absent from the campaign table.
pub const NOT_AVAILABLE: &str = "N/A";

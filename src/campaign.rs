// src/campaign.rs
//! Campaign metadata: the key/value table every report carries and the run
//! date used to key cross-run statistics.

use std::path::Path;

use serde::Serialize;

use crate::config::MarkupConfig;
use crate::constants::{
    KEY_CAMPAIGN_DATE, KEY_ENNA_VERSION, KEY_PYTHON_VERSION, KEY_TRAIN, TESTBENCH_ID_LEN, UNKNOWN,
    UNKNOWN_DATE,
};
use crate::document::{Document, NodeRef};

/// Where the campaign table lives; single-run and multi-run reports differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignSource {
    /// `div[data-tab=campaign]`
    CampaignTab,
    /// `div.content.active`
    ActiveContent,
}

/// Raw two-column rows of the campaign table, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampaignTable {
    entries: Vec<(String, String)>,
}

impl CampaignTable {
    #[must_use]
    pub fn from_entries(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Value of the last row with this key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn find_section<'a>(
    doc: &'a Document,
    source: CampaignSource,
    markup: &MarkupConfig,
) -> Option<NodeRef<'a>> {
    doc.elements_named("div").find(|div| match source {
        CampaignSource::CampaignTab => div.attr("data-tab") == Some(markup.campaign_tab.as_str()),
        CampaignSource::ActiveContent => {
            div.has_class(&markup.content_class) && div.has_class(&markup.active_class)
        }
    })
}

/// Reads the campaign table; `None` when the section is absent.
#[must_use]
pub fn extract_table(
    doc: &Document,
    source: CampaignSource,
    markup: &MarkupConfig,
) -> Option<CampaignTable> {
    let section = find_section(doc, source, markup)?;
    let entries = section
        .descendants_named("tr")
        .filter_map(|row| {
            let cells: Vec<NodeRef<'_>> = row.descendants_named("td").collect();
            match cells.as_slice() {
                [key, value] => Some((key.stripped_text(), value.stripped_text())),
                _ => None,
            }
        })
        .collect();
    Some(CampaignTable { entries })
}

/// First token of `Campaign date`, or the unknown-date sentinel.
#[must_use]
pub fn run_date(table: Option<&CampaignTable>) -> String {
    table
        .and_then(|t| t.get(KEY_CAMPAIGN_DATE))
        .and_then(|v| v.split_whitespace().next())
        .map_or_else(|| UNKNOWN_DATE.to_string(), str::to_string)
}

/// Bench and software versions of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignDetails {
    pub testbench_id: String,
    pub python_runtime_version: String,
    pub engine_version: String,
    pub train_label: String,
}

impl CampaignDetails {
    /// The testbench id comes from the file name, everything else from the table.
    #[must_use]
    pub fn from_table(source_file: &Path, table: Option<&CampaignTable>) -> Self {
        let lookup = |key: &str| {
            table
                .and_then(|t| t.get(key))
                .unwrap_or(UNKNOWN)
                .to_string()
        };
        Self {
            testbench_id: testbench_id(source_file),
            python_runtime_version: lookup(KEY_PYTHON_VERSION),
            engine_version: lookup(KEY_ENNA_VERSION),
            train_label: lookup(KEY_TRAIN),
        }
    }
}

fn testbench_id(source_file: &Path) -> String {
    source_file
        .file_name()
        .map(|n| n.to_string_lossy().chars().take(TESTBENCH_ID_LEN).collect())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

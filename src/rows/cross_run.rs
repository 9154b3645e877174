// src/rows/cross_run.rs
//! Tables of a multi-document run.

use std::collections::BTreeMap;

use super::{Cell, Table};
use crate::campaign::CampaignDetails;
use crate::constants::{NOT_AVAILABLE, NO_DATA};
use crate::multirun::{BatchReport, PerTestCaseDateCounts};

pub const DETAILS_TABLE: &str = "Details";
pub const FREQUENCY_TABLE: &str = "Error-Failure Analysis";
pub const DATE_TOTALS_TABLE: &str = "Summary Plot";
pub const DATE_OUTCOME_TABLE: &str = "Cyclic Summary";

const CAMPAIGN_HEADER: &str = "Campaign Details";

/// `Test Case, <dates>, Total Runs, Passes, Fails, Errors, Warnings, Stability%`
/// followed by the campaign rows.
#[must_use]
pub fn details_table(report: &BatchReport) -> Table {
    let dates: Vec<&str> = report.dates().collect();
    let mut columns = vec!["Test Case".to_string()];
    columns.extend(dates.iter().map(|d| (*d).to_string()));
    columns.extend(
        ["Total Runs", "Passes", "Fails", "Errors", "Warnings", "Stability%"]
            .iter()
            .map(|c| (*c).to_string()),
    );
    let mut table = Table::new(DETAILS_TABLE, columns);

    for (test_case, per_date) in report.verdicts.test_cases() {
        let mut row = vec![Cell::from(test_case)];
        let mut sum = PerTestCaseDateCounts::default();
        for date in &dates {
            match per_date.get(*date).filter(|c| c.total > 0) {
                Some(counts) => {
                    row.push(Cell::Text(format!("{}/{}", counts.pass, counts.total)));
                    sum.absorb(counts);
                }
                None => row.push(Cell::from(NO_DATA)),
            }
        }
        row.extend([
            Cell::Count(sum.total),
            Cell::Count(sum.pass),
            Cell::Count(sum.fail),
            Cell::Count(sum.error),
            Cell::Count(sum.warning),
            Cell::Text(stability(&sum)),
        ]);
        table.push_row(row);
    }

    push_campaign_rows(&mut table, &dates, 1, &report.campaigns);
    table
}

/// Share of passing runs, two decimals.
#[allow(clippy::cast_precision_loss)]
fn stability(sum: &PerTestCaseDateCounts) -> String {
    if sum.total == 0 {
        return NO_DATA.to_string();
    }
    format!("{:.2}%", sum.pass as f64 / sum.total as f64 * 100.0)
}

/// `Error/Failure Message, Category, Occurrences, Associated Test Cases, <dates>`
/// followed by the campaign rows.
#[must_use]
pub fn frequency_table(report: &BatchReport) -> Table {
    let dates: Vec<&str> = report.dates().collect();
    let mut columns: Vec<String> = [
        "Error/Failure Message",
        "Category",
        "Occurrences",
        "Associated Test Cases",
    ]
    .iter()
    .map(|c| (*c).to_string())
    .collect();
    columns.extend(dates.iter().map(|d| (*d).to_string()));
    let mut table = Table::new(FREQUENCY_TABLE, columns);

    for (message, entry) in report.frequency.entries() {
        let associated: Vec<&str> = entry.test_cases.iter().map(String::as_str).collect();
        let mut row = vec![
            Cell::from(message),
            Cell::from(entry.category.label()),
            Cell::Count(entry.occurrences),
            Cell::Text(associated.join("; ")),
        ];
        row.extend(
            dates
                .iter()
                .map(|d| entry.on_date(d).map_or_else(|| Cell::from(NO_DATA), Cell::Count)),
        );
        table.push_row(row);
    }

    push_campaign_rows(&mut table, &dates, 4, &report.campaigns);
    table
}

/// Campaign rows: the label goes in the first column, one value per date column.
fn push_campaign_rows(
    table: &mut Table,
    dates: &[&str],
    first_date_column: usize,
    campaigns: &BTreeMap<String, CampaignDetails>,
) {
    let fields: [(&str, fn(&CampaignDetails) -> &str); 5] = [
        (CAMPAIGN_HEADER, |_| ""),
        ("Bench Name", |d| d.testbench_id.as_str()),
        ("Python Version", |d| d.python_runtime_version.as_str()),
        ("ENNA Version", |d| d.engine_version.as_str()),
        ("Train", |d| d.train_label.as_str()),
    ];
    let width = table.columns.len();
    for (label, value_of) in fields {
        let mut row = vec![Cell::blank(); width];
        if let Some(first) = row.first_mut() {
            *first = Cell::from(label);
        }
        for (offset, date) in dates.iter().enumerate() {
            let value = campaigns.get(*date).map_or(NOT_AVAILABLE, value_of);
            if let Some(cell) = row.get_mut(first_date_column + offset) {
                *cell = Cell::from(value);
            }
        }
        table.push_row(row);
    }
}

/// Pass/fail/error/warning summed over test cases, one row per date.
#[must_use]
pub fn date_totals_table(report: &BatchReport) -> Table {
    let mut table = Table::new(DATE_TOTALS_TABLE, ["Date", "Pass", "Fail", "Error", "Warning"]);
    for date in report.dates() {
        let sum = report.verdicts.date_totals(date);
        table.push_row(vec![
            Cell::from(date),
            Cell::Count(sum.pass),
            Cell::Count(sum.fail),
            Cell::Count(sum.error),
            Cell::Count(sum.warning),
        ]);
    }
    table
}

/// Passed/failed script counts and names per date.
#[must_use]
pub fn date_outcome_table(report: &BatchReport) -> Table {
    let mut table = Table::new(
        DATE_OUTCOME_TABLE,
        ["Date", "Passed", "Failed", "Passed Scripts", "Failed Scripts"],
    );
    for date in report.dates() {
        let outcome = report.verdicts.date_outcomes(date);
        table.push_row(vec![
            Cell::from(date),
            Cell::Count(outcome.passed.len()),
            Cell::Count(outcome.failed.len()),
            Cell::Text(outcome.passed.join(", ")),
            Cell::Text(outcome.failed.join(", ")),
        ]);
    }
    table
}

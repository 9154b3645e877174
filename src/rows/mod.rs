// src/rows/mod.rs
//! Flattening aggregates into ordered, presentation-ready tables.

pub mod cross_run;
pub mod single;

pub use cross_run::{
    date_outcome_table, date_totals_table, details_table, frequency_table, DETAILS_TABLE,
    FREQUENCY_TABLE,
};
pub use single::{build_single_report, SingleRunReport, EVENT_COLUMNS, ISSUE_COLUMNS};

use std::fmt;

use serde::Serialize;

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Count(usize),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn blank() -> Self {
        Self::Text(String::new())
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(t) if t.is_empty())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => f.write_str(t),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Self::Count(value)
    }
}

/// A named table with a fixed column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding with blanks or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::blank());
        self.rows.push(row);
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

/// Blanks the label of rows 2..n of every contiguous run sharing a label.
///
/// Runs are detected on the original labels, so a blanked row never starts
/// a new run. Row count and every other cell are left untouched.
pub fn collapse_labels(rows: &mut [Vec<Cell>], column: usize) {
    let mut previous: Option<Cell> = None;
    for row in rows {
        let Some(cell) = row.get_mut(column) else {
            previous = None;
            continue;
        };
        let current = cell.clone();
        if previous.as_ref() == Some(&current) {
            *cell = Cell::blank();
        }
        previous = Some(current);
    }
}

// src/reporting/terminal.rs
//! Colored tables and summaries for the terminal.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use super::TableSink;
use crate::error::{Result, StimtraceError};
use crate::multirun::BatchReport;
use crate::rows::Table;
use crate::summary::Summary;

/// Cells wider than this are cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 48;
const BAR_WIDTH: usize = 40;

pub struct TerminalSink<W: Write> {
    out: W,
}

impl TerminalSink<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Key/value lines followed by category counts and a proportional bar.
    ///
    /// # Errors
    /// Returns error if the output cannot be written.
    pub fn write_summary(&mut self, campaign: &[(String, String)], summary: &Summary) -> Result<()> {
        self.line(format!("{}", "SUMMARY".bold().underline()))?;
        let label_width = campaign.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in campaign {
            self.line(format!("  {:<label_width$}  {value}", label.bold()))?;
        }
        if !campaign.is_empty() {
            self.line(String::new())?;
        }

        for (label, count) in summary.categories() {
            let share = summary.share(count);
            self.line(format!(
                "  {:<10} {:>6}  {:>5.1}%",
                paint(label, label),
                count,
                share
            ))?;
        }
        self.line(format!("  {}", bar(summary)))?;
        self.line(String::new())
    }

    /// One line per batch: documents, dates and failed documents.
    ///
    /// # Errors
    /// Returns error if the output cannot be written.
    pub fn write_batch_footer(&mut self, report: &BatchReport) -> Result<()> {
        let status = if report.is_partial() {
            format!("[PARTIAL] {} document(s) failed", report.failures.len())
                .yellow()
                .bold()
        } else {
            "[OK]".green().bold()
        };
        self.line(format!(
            "{status} {} document(s), {} run date(s) in {}ms",
            report.documents,
            report.verdicts.date_count(),
            report.duration_ms
        ))?;
        for failure in &report.failures {
            self.line(format!(
                "  {} {}: {}",
                "-->".red(),
                failure.path.display(),
                failure.reason.dimmed()
            ))?;
        }
        Ok(())
    }

    fn line(&mut self, text: String) -> Result<()> {
        writeln!(self.out, "{text}").map_err(|e| StimtraceError::io(e, "<terminal>"))
    }
}

impl<W: Write> TableSink for TerminalSink<W> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        let header = format!("{} ({} rows)", table.name, table.len());
        self.line(format!("{}", header.bold().cyan()))?;
        if table.is_empty() {
            self.line(format!("  {}", "(none)".dimmed()))?;
            return self.line(String::new());
        }

        let widths = column_widths(table);
        let head: Vec<String> = table
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", clip(c), w = *w))
            .collect();
        self.line(format!("  {}", head.join(" | ").bold()))?;

        let type_column = table.column("Type").or_else(|| table.column("Category"));
        for row in &table.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    let text = format!("{:<w$}", clip(&cell.to_string()), w = *w);
                    if Some(i) == type_column {
                        paint(&cell.to_string(), &text).to_string()
                    } else {
                        text
                    }
                })
                .collect();
            self.line(format!("  {}", cells.join(" | ")))?;
        }
        self.line(String::new())
    }
}

fn column_widths(table: &Table) -> Vec<usize> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            table
                .column_values(i)
                .map(|c| clip(&c.to_string()).chars().count())
                .chain(std::iter::once(clip(name).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

/// Colors `text` by the category named in `key`.
fn paint(key: &str, text: &str) -> ColoredString {
    match key.trim() {
        "Passes" | "Pass" => text.green(),
        "Warnings" | "Warning" => text.yellow(),
        "Failures" | "Failure" => text.truecolor(255, 165, 0),
        "Errors" | "Error" => text.red(),
        _ => text.normal(),
    }
}

fn bar(summary: &Summary) -> String {
    let total = summary.total();
    if total == 0 {
        return "-".repeat(BAR_WIDTH).dimmed().to_string();
    }
    summary
        .categories()
        .iter()
        .map(|(label, count)| {
            let width = count * BAR_WIDTH / total;
            paint(label, &"#".repeat(width)).to_string()
        })
        .collect()
}

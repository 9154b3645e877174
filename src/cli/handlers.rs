use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::aggregate::{analyze_document, AnalysisMode};
use crate::cli::args::OutputArgs;
use crate::config::Config;
use crate::discovery;
use crate::document::Document;
use crate::exit::StimtraceExit;
use crate::multirun::{self, BatchReport};
use crate::reporting::{self, JsonSink, TableSink, TerminalSink};
use crate::rows::{self, build_single_report, Table};

/// Handles the single command.
///
/// # Errors
/// Returns error if the report cannot be read or the output cannot be written.
pub fn handle_single(
    file: &Path,
    cyclic: bool,
    output: &OutputArgs,
    config: &Config,
) -> Result<StimtraceExit> {
    let doc = Document::load(file)?;
    let mode = if cyclic {
        AnalysisMode::Cyclic
    } else {
        AnalysisMode::SingleRun
    };
    let analysis = analyze_document(&doc, mode, config);
    let report = build_single_report(&analysis, &config.excluded_test_cases()?);
    tracing::info!(
        path = %file.display(),
        issues = report.issues.len(),
        passes = report.summary.passes,
        warnings = report.summary.warnings,
        "analyzed report"
    );

    if !output.quiet {
        let mut term = TerminalSink::stdout();
        term.write_summary(&report.campaign, &report.summary)?;
        term.write_tables(report.tables())?;
    }

    if let Some(dir) = &output.out {
        let path = reporting::single_output_path(dir, file, cyclic);
        let name = if cyclic { "cyclic" } else { "single" };
        let mut sink = JsonSink::new(path, name).with_metadata(report.campaign.clone());
        sink.write_table(&report.summary.to_table())?;
        sink.write_tables(report.tables())?;
        announce(&sink.finish()?, output.quiet);
    }
    Ok(StimtraceExit::Success)
}

/// Handles the stats command.
///
/// # Errors
/// Returns error if no documents are found or the output cannot be written.
pub fn handle_stats(paths: &[PathBuf], output: &OutputArgs, config: &Config) -> Result<StimtraceExit> {
    let report = run_batch(paths, config)?;
    let tables = [
        rows::details_table(&report),
        rows::date_totals_table(&report),
        rows::date_outcome_table(&report),
    ];
    emit_batch(&report, &tables, output, reporting::STATS_OUTPUT)
}

/// Handles the errors command.
///
/// # Errors
/// Returns error if no documents are found or the output cannot be written.
pub fn handle_errors(
    paths: &[PathBuf],
    output: &OutputArgs,
    config: &Config,
) -> Result<StimtraceExit> {
    let report = run_batch(paths, config)?;
    let tables = [rows::frequency_table(&report)];
    emit_batch(&report, &tables, output, reporting::ERRORS_OUTPUT)
}

fn run_batch(paths: &[PathBuf], config: &Config) -> Result<BatchReport> {
    let files = discovery::discover(paths)?;
    let report = multirun::analyze_batch(&files, config)?;
    Ok(report)
}

fn emit_batch(
    report: &BatchReport,
    tables: &[Table],
    output: &OutputArgs,
    file_name: &str,
) -> Result<StimtraceExit> {
    if !output.quiet {
        let mut term = TerminalSink::stdout();
        term.write_tables(tables)?;
        term.write_batch_footer(report)?;
    }

    if let Some(dir) = &output.out {
        let mut sink = JsonSink::new(dir.join(file_name), file_name.trim_end_matches(".json"));
        sink.write_tables(tables)?;
        let written = sink
            .finish()
            .with_context(|| format!("Failed to write {file_name}"))?;
        announce(&written, output.quiet);
    }

    if report.is_partial() {
        Ok(StimtraceExit::PartialBatch)
    } else {
        Ok(StimtraceExit::Success)
    }
}

fn announce(path: &Path, quiet: bool) {
    if !quiet {
        println!("{} {}", "Report written to".green(), path.display());
    }
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stimtrace", version, about = "Test-run report analyzer")]
pub struct Cli {
    /// Debug-level logging (overridden by STIMTRACE_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
    /// Configuration file (default: ./stimtrace.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one report: issues, passes, warnings and a summary
    Single {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Treat the report as repeated (cyclic) runs and keep every occurrence
        #[arg(long)]
        cyclic: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Pass/fail statistics per test case across run dates
    Stats {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Error/failure message frequency across run dates
    Errors {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write a JSON report into this directory
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
    /// Do not print tables to the terminal
    #[arg(long, short)]
    pub quiet: bool,
}

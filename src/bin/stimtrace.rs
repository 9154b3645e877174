// src/bin/stimtrace.rs
use clap::Parser;
use colored::Colorize;

use stimtrace_core::cli::{self, Cli};
use stimtrace_core::exit::StimtraceExit;
use stimtrace_core::telemetry;

fn main() -> StimtraceExit {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log_json, telemetry::level_for(cli.verbose));

    match cli::dispatch(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            StimtraceExit::from(&e)
        }
    }
}

// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, OutputArgs};

use anyhow::Result;

use crate::config::Config;
use crate::exit::StimtraceExit;

/// Loads configuration and runs the chosen command.
///
/// # Errors
/// Returns error if configuration is invalid or the command fails.
pub fn dispatch(cli: &Cli) -> Result<StimtraceExit> {
    let config = Config::load(cli.config.as_deref())?;
    match &cli.command {
        Commands::Single {
            file,
            cyclic,
            output,
        } => handlers::handle_single(file, *cyclic, output, &config),
        Commands::Stats { paths, output } => handlers::handle_stats(paths, output, &config),
        Commands::Errors { paths, output } => handlers::handle_errors(paths, output, &config),
    }
}

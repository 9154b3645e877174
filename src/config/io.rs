// src/config/io.rs
use std::fs;
use std::path::Path;

use super::types::Config;
use crate::error::{Result, StimtraceError};

pub const CONFIG_FILE: &str = "stimtrace.toml";

/// Parses config text; every section and field is optional.
///
/// # Errors
/// Returns error on malformed TOML.
pub fn parse_toml(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| StimtraceError::Config(e.to_string()))
}

/// Loads an explicit config file.
///
/// # Errors
/// Returns error if the file is unreadable or malformed.
pub fn load_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| StimtraceError::io(e, path))?;
    parse_toml(&content)
}

/// Loads `stimtrace.toml` from `dir` when present, defaults otherwise.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_local(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(Config::default());
    }
    load_file(&path)
}

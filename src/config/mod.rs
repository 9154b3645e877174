// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{ClassifierConfig, Config, MarkupConfig, RollupConfig};

use std::path::Path;

use regex::Regex;

use crate::error::{Result, StimtraceError};

impl Config {
    /// Loads the explicit file if given, else `stimtrace.toml` from the working directory.
    ///
    /// # Errors
    /// Returns error if the chosen file is unreadable, malformed or invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => io::load_file(path)?,
            None => io::load_local(Path::new("."))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error on empty class names, a zero limit or a bad pattern.
    pub fn validate(&self) -> Result<()> {
        if let Some(field) = self.markup.invalid_name() {
            return Err(StimtraceError::Config(format!(
                "markup.{field} must be a single non-empty class name"
            )));
        }
        if self.classifier.continuation_threshold == 0 {
            return Err(StimtraceError::Config(
                "classifier.continuation_threshold must be positive".to_string(),
            ));
        }
        if self.classifier.previous_actions_limit == 0 {
            return Err(StimtraceError::Config(
                "classifier.previous_actions_limit must be positive".to_string(),
            ));
        }
        self.excluded_test_cases()?;
        Ok(())
    }

    /// Compiles the rollup exclusion pattern.
    ///
    /// # Errors
    /// Returns error if the pattern is not a valid regex.
    pub fn excluded_test_cases(&self) -> Result<Regex> {
        Ok(Regex::new(&self.rollup.excluded_test_case_pattern)?)
    }
}

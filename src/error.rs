// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StimtraceError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Unreadable markup at byte {position}: {message}")]
    Markup { position: usize, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No report documents found in the given paths")]
    NoDocuments,
}

pub type Result<T> = std::result::Result<T, StimtraceError>;

impl StimtraceError {
    /// Attaches a path to an I/O failure.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to StimtraceError::Io with unknown path.
impl From<std::io::Error> for StimtraceError {
    fn from(source: std::io::Error) -> Self {
        StimtraceError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for StimtraceError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(PathBuf::from).unwrap_or_default();
        let source = e
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
        StimtraceError::Io { source, path }
    }
}

// src/exit.rs
//! Process exit codes for `stimtrace`.
//!
//! Scripts can rely on these values.

use std::process::Termination;

use crate::error::StimtraceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum StimtraceExit {
    /// Every document was analyzed.
    Success = 0,
    /// Generic error (I/O, config, output).
    Error = 1,
    /// No report documents in the given paths.
    InvalidInput = 2,
    /// Some documents of a batch failed and were left out.
    PartialBatch = 3,
}

impl StimtraceExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for StimtraceExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<&anyhow::Error> for StimtraceExit {
    fn from(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<StimtraceError>() {
            Some(StimtraceError::NoDocuments) => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(StimtraceExit::Success.code(), 0);
        assert_eq!(StimtraceExit::PartialBatch.code(), 3);
    }

    #[test]
    fn test_from_error() {
        let no_docs = anyhow::Error::new(StimtraceError::NoDocuments);
        assert_eq!(StimtraceExit::from(&no_docs), StimtraceExit::InvalidInput);
        let other = anyhow::anyhow!("disk full");
        assert_eq!(StimtraceExit::from(&other), StimtraceExit::Error);
    }
}

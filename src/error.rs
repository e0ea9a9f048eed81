//! Failure taxonomy and exit-code classification
//!
//! Library functions return [`eyre::Result`]. Failures a caller may want to
//! branch on are raised as an [`Error`] inside the report, so the binary can
//! tell bad data (exit 2) apart from a bad invocation or environment (exit 1)
//! even after context has been attached.

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Classified pipeline failures
#[derive(Debug, Error)]
pub enum Error {
    /// Input or output extension is not one of `.csv`, `.xlsx`, `.xls`
    #[error("Unsupported format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// File could not be decoded into a table
    #[error("Failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// Malformed `old:new` pair in a rename mapping
    #[error("Invalid rename pair {pair:?}: expected exactly one ':'")]
    Mapping { pair: String },

    /// Strict select referenced columns that do not exist
    #[error("Columns not found: {0:?}")]
    MissingSelected(Vec<String>),

    /// Required-column validation failed
    #[error("Missing required columns: {0:?}")]
    MissingRequired(Vec<String>),

    /// Lenient select referenced columns that do not exist
    #[error("{0:?} not in columns")]
    ColumnNotFound(Vec<String>),

    /// A rename would leave two columns with the same name
    #[error("Duplicate column name after rename: {0:?}")]
    DuplicateColumn(String),

    /// Nothing to concatenate
    #[error("No tables to concatenate")]
    NoInputs,
}

impl Error {
    /// Whether this failure means "bad data" rather than "bad invocation"
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingSelected(_) | Error::MissingRequired(_))
    }
}

/// Terminal state of a run, mapped onto the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    ExecutionFailure,
    ValidationFailure,
}

impl ExitStatus {
    /// Classify a failed run by the first [`Error`] found in the report chain
    pub fn from_report(report: &eyre::Report) -> Self {
        let validation = report
            .chain()
            .find_map(|cause| cause.downcast_ref::<Error>())
            .is_some_and(Error::is_validation);

        match validation {
            true => ExitStatus::ValidationFailure,
            false => ExitStatus::ExecutionFailure,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::ExecutionFailure => 1,
            ExitStatus::ValidationFailure => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

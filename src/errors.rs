//! Error types for credential export loading
//!
//! Provides rich, user-friendly diagnostics for the two failure modes a
//! load can hit: a missing input file, or a file that is not a usable
//! credential export.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::loader::REQUIRED_COLUMNS;

/// Errors produced while loading a credential export file
#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    /// Input path does not exist
    #[error("input file not found: '{}'", .path.display())]
    #[diagnostic(
        code(passdiff::not_found),
        help("check that the path is spelled correctly and the file is readable")
    )]
    NotFound { path: PathBuf },

    /// Header row lacks one or more of the required columns
    #[error("'{}' is missing required column(s): {}", .path.display(), .missing.join(", "))]
    #[diagnostic(
        code(passdiff::missing_columns),
        help("the header row must contain columns named 'url', 'username' and 'password' (other columns are ignored)")
    )]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    /// File exists but cannot be parsed as delimited text
    #[error("could not read '{}' as CSV", .path.display())]
    #[diagnostic(
        code(passdiff::malformed),
        help("expected a UTF-8 comma-separated file with a header row containing 'url', 'username' and 'password'")
    )]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// Build a `MissingColumns` error from the columns that were absent
    pub fn missing_columns(path: &std::path::Path, missing: Vec<String>) -> Self {
        debug_assert!(!missing.is_empty());
        LoadError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        }
    }

    /// The full set of columns a valid export must carry
    pub fn expected_columns() -> &'static [&'static str] {
        &REQUIRED_COLUMNS
    }
}

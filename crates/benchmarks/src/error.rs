// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for report generation.
//!
//! [`ParseError`] is scoped to a single result file and is recovered by the
//! corpus scanner. [`ReportError`] aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one result file into a record.
#[derive(Debug, Error)]
pub enum ParseError {
    /// File could not be read or is not valid CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// File contains no rows at all.
    #[error("file has no header row")]
    Empty,

    /// A numeric column holds something other than a number or `NA`.
    #[error("invalid number in column '{column}': {value:?}")]
    InvalidNumber { column: String, value: String },
}

/// Run-level failure.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Results root does not exist or is not a directory.
    #[error("results directory not found: {}", .path.display())]
    MissingResultsRoot { path: PathBuf },

    /// Every file was skipped or none matched.
    #[error("no benchmark records found in {} ({skipped} files skipped)", .path.display())]
    EmptyCorpus { path: PathBuf, skipped: usize },

    /// Filesystem error outside per-file parsing.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output document could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the run failed because there was nothing to report on.
    ///
    /// The remedy for these is running benchmarks, not fixing the tool.
    pub fn is_empty_corpus(&self) -> bool {
        matches!(
            self,
            ReportError::MissingResultsRoot { .. } | ReportError::EmptyCorpus { .. }
        )
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

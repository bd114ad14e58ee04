// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report run results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What a report run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResult {
    /// Records parsed from the corpus.
    pub records: usize,
    /// Summary rows emitted.
    pub summary_rows: usize,
    /// Configuration directories scanned.
    pub directories: usize,
    /// Result files that failed to parse.
    pub skipped_files: usize,
    /// Where the data document was written.
    pub output_path: PathBuf,
    /// Where the markdown summary was written, if requested.
    pub markdown_path: Option<PathBuf>,
}

// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Corpus discovery.
//!
//! The results root holds one directory per device configuration, and each
//! of those holds the result files of that configuration. Discovery walks
//! exactly these two levels. Entries are visited in file-name order so the
//! record order is reproducible.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use edgebench_core::RawRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{ReportError, Result};
use crate::parser;

/// Name pattern of result files written by the benchmark runner.
pub const RESULT_FILE_PATTERN: &str = r"e2e-edge-pipeline_.*\.csv$";

static RESULT_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(RESULT_FILE_PATTERN).expect("result file pattern is valid"));

/// Whether a file name looks like a result file.
pub fn is_result_file(name: &str) -> bool {
    RESULT_FILE_RE.is_match(name)
}

/// A result file that was left out of the corpus.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Outcome of scanning the results root.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Parsed records in discovery order.
    pub records: Vec<RawRecord>,
    /// Configuration directories visited.
    pub directories: usize,
    /// Files whose name matched the result file pattern.
    pub files_matched: usize,
    /// Matched files that produced no record because of an error.
    pub skipped: Vec<SkippedFile>,
}

/// Scan `root` and parse every result file below it.
///
/// A file that cannot be parsed is logged and skipped. The run itself fails
/// only when `root` is missing or nothing could be parsed.
pub fn scan_corpus(root: &Path) -> Result<ScanReport> {
    if !root.is_dir() {
        return Err(ReportError::MissingResultsRoot {
            path: root.to_path_buf(),
        });
    }

    let mut report = ScanReport::default();
    for config_dir in sorted_entries(root).map_err(|e| ReportError::io(root, e))? {
        if !config_dir.is_dir() {
            continue;
        }
        report.directories += 1;
        scan_config_dir(&config_dir, &mut report);
    }

    if report.records.is_empty() {
        return Err(ReportError::EmptyCorpus {
            path: root.to_path_buf(),
            skipped: report.skipped.len(),
        });
    }
    Ok(report)
}

fn scan_config_dir(dir: &Path, report: &mut ScanReport) {
    info!("Scanning {}/ for results files", display_name(dir));

    let entries = match sorted_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list {}: {}", dir.display(), e);
            return;
        }
    };

    for path in entries {
        let matched = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_result_file);
        if !matched {
            continue;
        }
        report.files_matched += 1;

        match parser::parse_file(&path) {
            Ok(Some(record)) => {
                debug!(file = %path.display(), config = %record.config, "parsed result file");
                report.records.push(record);
            }
            Ok(None) => debug!(file = %path.display(), "no data row, skipping"),
            Err(e) => {
                warn!("Failed to parse {}: {}", display_name(&path), e);
                report.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

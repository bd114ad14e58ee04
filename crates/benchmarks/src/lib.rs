// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Edge pipeline benchmark report generation.
//!
//! This crate turns the per-run CSV files written by the edge inference
//! benchmark runner into the single JSON document the dashboard renders.
//!
//! # Quick Start
//!
//! ```no_run
//! use edgebench_benchmarks::{generate_report, ReportOptions};
//!
//! let result = generate_report(&ReportOptions::default())?;
//! println!("{} runs -> {} rows", result.records, result.summary_rows);
//! # Ok::<(), edgebench_benchmarks::ReportError>(())
//! ```
//!
//! # Modules
//!
//! - [`parser`] - one result file to one [`RawRecord`]
//! - [`scanner`] - two-level discovery of result files
//! - [`aggregate`] - grouping and numeric reduction
//! - [`ordering`] - presentation order of summary rows
//! - [`io`] - reading and writing the data document
//! - [`markdown`] - markdown summary generation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod io;
pub mod markdown;
pub mod ordering;
pub mod parser;
pub mod result;
pub mod scanner;

pub use edgebench_core::{GroupKey, OutputDocument, RawRecord, SummaryRow};
pub use error::{ParseError, ReportError, Result};
pub use result::ReportResult;
pub use scanner::{scan_corpus, ScanReport};

use std::path::{Path, PathBuf};
use tracing::info;

/// Where a report run reads from and writes to.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Results root to scan.
    pub results_dir: PathBuf,
    /// Data document destination.
    pub output_path: PathBuf,
    /// Markdown summary destination, `None` to skip it.
    pub markdown_path: Option<PathBuf>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(io::DEFAULT_RESULTS_DIR),
            output_path: PathBuf::from(io::DEFAULT_OUTPUT_PATH),
            markdown_path: None,
        }
    }
}

/// Aggregate records into ordered summary rows.
pub fn summarize(records: &[RawRecord]) -> Vec<SummaryRow> {
    let mut rows = aggregate::aggregate(records);
    ordering::sort_summary(&mut rows);
    rows
}

/// Build the data document for a scanned corpus.
pub fn build_document(results_dir: &Path, records: Vec<RawRecord>) -> OutputDocument {
    OutputDocument {
        summary: summarize(&records),
        raw: records,
        generated: OutputDocument::generator_tag(),
        timestamp: io::corpus_timestamp(results_dir),
    }
}

/// Scan, aggregate and write the report.
///
/// Nothing is written when the corpus is missing or yields no records.
///
/// # Errors
///
/// Returns [`ReportError::MissingResultsRoot`] or [`ReportError::EmptyCorpus`]
/// when there is nothing to report, and an I/O or JSON error when writing
/// fails.
pub fn generate_report(options: &ReportOptions) -> Result<ReportResult> {
    let scan = scan_corpus(&options.results_dir)?;
    let directories = scan.directories;
    let skipped_files = scan.skipped.len();

    let document = build_document(&options.results_dir, scan.records);
    io::write_output_document(&document, &options.output_path)?;
    info!("Generated data file: {}", options.output_path.display());

    if let Some(markdown_path) = &options.markdown_path {
        io::write_markdown_summary(&document, markdown_path)?;
        info!("Generated markdown summary: {}", markdown_path.display());
    }

    info!(
        "Processed {} records into {} summary entries",
        document.raw.len(),
        document.summary.len()
    );

    Ok(ReportResult {
        records: document.raw.len(),
        summary_rows: document.summary.len(),
        directories,
        skipped_files,
        output_path: options.output_path.clone(),
        markdown_path: options.markdown_path.clone(),
    })
}

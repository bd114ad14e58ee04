// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! I/O operations for report documents.
//!
//! This module writes the dashboard data document and the optional markdown
//! summary, and reads a previously written document back.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use edgebench_core::OutputDocument;

use crate::error::{ReportError, Result};
use crate::markdown;

/// Default results root, one subdirectory per device configuration.
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Default dashboard data document path.
pub const DEFAULT_OUTPUT_PATH: &str = "html/data.json";

/// Default markdown summary path.
pub const DEFAULT_MARKDOWN_PATH: &str = "html/summary.md";

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Write the data document, replacing any previous file at `path`.
pub fn write_output_document(document: &OutputDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json).map_err(|e| ReportError::io(path, e))
}

/// Read a data document written by [`write_output_document`].
pub fn read_output_document(path: impl AsRef<Path>) -> Result<OutputDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the markdown summary of a document.
pub fn write_markdown_summary(document: &OutputDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let summary = markdown::generate_summary(document);
    fs::write(path, summary).map_err(|e| ReportError::io(path, e))
}

/// Last-modified time of the results root, if it exists.
pub fn corpus_modified(root: impl AsRef<Path>) -> Option<SystemTime> {
    fs::metadata(root).and_then(|m| m.modified()).ok()
}

/// Results root last-modified time as fractional Unix seconds.
pub fn corpus_timestamp(root: impl AsRef<Path>) -> Option<String> {
    let modified = corpus_modified(root)?;
    let since_epoch = modified.duration_since(UNIX_EPOCH).ok()?;
    Some(since_epoch.as_secs_f64().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgebench_core::{RawRecord, SummaryRow};

    fn document() -> OutputDocument {
        OutputDocument {
            summary: vec![SummaryRow {
                config: "light".into(),
                device_config: "GPU-NPU".into(),
                detect: "GPU".into(),
                classify: "NPU".into(),
                batch: "8".into(),
                runs: 1,
                avg_throughput: Some(0.0),
                theoretical_streams: None,
                avg_power: None,
                efficiency: Some(1.5),
            }],
            raw: vec![RawRecord::default()],
            generated: OutputDocument::generator_tag(),
            timestamp: Some("1700000000.5".into()),
        }
    }

    #[test]
    fn test_write_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("html").join("data.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x".repeat(10_000)).unwrap();

        write_output_document(&document(), &path).unwrap();
        let back = read_output_document(&path).unwrap();
        assert_eq!(back, document());
    }

    #[test]
    fn test_absent_fields_written_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_output_document(&document(), &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let row = &json["summary"][0];
        assert!(row["avg_power"].is_null());
        assert!(row["theoretical_streams"].is_null());
        assert_eq!(row["avg_throughput"], 0.0);
        assert!(json["raw"][0]["device_config"].is_null());
    }

    #[test]
    fn test_corpus_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let stamp = corpus_timestamp(dir.path()).unwrap();
        assert!(stamp.parse::<f64>().unwrap() > 0.0);
        assert!(corpus_timestamp(dir.path().join("missing")).is_none());
    }
}

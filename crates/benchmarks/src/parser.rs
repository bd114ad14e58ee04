// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result file parsing.
//!
//! A result file is a CSV with a header row naming columns and a single data
//! row. The header vocabulary varies between device and model
//! configurations, so the parser works from a column → value map and lets
//! missing columns degrade to empty or absent fields.

use std::collections::HashMap;
use std::path::Path;

use edgebench_core::record::{columns, pipeline_descriptor};
use edgebench_core::RawRecord;

use crate::error::ParseError;

/// Column name → value mapping of one data row.
pub type Row = HashMap<String, String>;

/// Parse one row into a record.
///
/// Fails only when a numeric column holds something other than a finite
/// number or `NA`.
pub fn parse_row(row: &Row) -> Result<RawRecord, ParseError> {
    let text = |column: &str| row.get(column).cloned().unwrap_or_default();
    let column = |name: &str| row.get(name).map(String::as_str);

    Ok(RawRecord {
        timestamp: text(columns::TIMESTAMP),
        system: text(columns::SYSTEM),
        duration: text(columns::DURATION),
        cores: text(columns::CORES_PINNED),
        config: text(columns::PIPELINE_CONFIG),
        detect: text(columns::DETECT_DEVICE),
        classify: text(columns::CLASSIFY_DEVICE),
        batch: text(columns::BATCH),
        throughput: parse_optional_float(row, columns::THROUGHPUT)?,
        per_stream: parse_optional_float(row, columns::THROUGHPUT_PER_STREAM)?,
        theoretical: text(columns::THEORETICAL_STREAM_DENSITY),
        streams: text(columns::MEASURED_STREAM_DENSITY),
        pipeline: pipeline_descriptor(
            column(columns::PIPELINE1),
            column(columns::PIPELINE2),
            column(columns::PIPELINE),
        ),
        device_config: row.get(columns::DEVICE_CONFIGURATION).cloned(),
        avg_power: parse_optional_float(row, columns::AVG_POWER)?,
        efficiency: parse_optional_float(row, columns::EFFICIENCY)?,
    })
}

/// Read a numeric column.
///
/// Missing, blank and `NA` (any case) values are `None`. `NaN` and infinities
/// are rejected: they cannot be told apart from a missing value once written
/// as JSON.
pub fn parse_optional_float(row: &Row, column: &str) -> Result<Option<f64>, ParseError> {
    let Some(raw) = row.get(column) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("NA") {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ParseError::InvalidNumber {
            column: column.to_string(),
            value: raw.clone(),
        }),
    }
}

/// Parse a result file.
///
/// Returns `Ok(None)` when the file has a header but no data row. Rows after
/// the first data row are ignored. When header and data row differ in
/// length, the extra cells of the longer one are dropped; a repeated header
/// name keeps its last value.
pub fn parse_file(path: &Path) -> Result<Option<RawRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = reader.records();

    let header = match rows.next() {
        Some(header) => header?,
        None => return Err(ParseError::Empty),
    };
    let values = match rows.next() {
        Some(values) => values?,
        None => return Ok(None),
    };

    let row: Row = header
        .iter()
        .zip(values.iter())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    parse_row(&row).map(Some)
}

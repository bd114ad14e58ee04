// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Raw benchmark run records.
//!
//! A [`RawRecord`] is the normalized form of a single result file: one header
//! row plus one data row written by the benchmark runner. Result files from
//! different device and model configurations do not share a fixed schema, so
//! every field tolerates its column being missing.

use serde::{Deserialize, Serialize};

/// Column names recognized in result file headers.
///
/// Columns not listed here are ignored by the parser.
pub mod columns {
    /// Run start time.
    pub const TIMESTAMP: &str = "Timestamp";
    /// Host system identifier.
    pub const SYSTEM: &str = "System";
    /// Run duration, kept verbatim.
    pub const DURATION: &str = "Duration (s)";
    /// CPU cores the pipeline was pinned to.
    pub const CORES_PINNED: &str = "Cores Pinned";
    /// Pipeline load tier (light / medium / heavy).
    pub const PIPELINE_CONFIG: &str = "Pipeline Config";
    /// Device running the detection stage.
    pub const DETECT_DEVICE: &str = "Detect Device";
    /// Device running the classification stage.
    pub const CLASSIFY_DEVICE: &str = "Classify Device";
    /// Inference batch size.
    pub const BATCH: &str = "Batch";
    /// Aggregate throughput in frames per second.
    pub const THROUGHPUT: &str = "Throughput (fps)";
    /// Throughput divided by stream count.
    pub const THROUGHPUT_PER_STREAM: &str = "Throughput per Stream (fps/#)";
    /// Externally computed stream capacity at 30 fps.
    pub const THEORETICAL_STREAM_DENSITY: &str = "Theoretical Stream Density (@30fps±5%)";
    /// Number of streams actually measured.
    pub const MEASURED_STREAM_DENSITY: &str = "Measured Stream Density (#)";
    /// First stage of a two-stage pipeline.
    pub const PIPELINE1: &str = "Pipeline1";
    /// Second stage of a two-stage pipeline.
    pub const PIPELINE2: &str = "Pipeline2";
    /// Single-stage pipeline description.
    pub const PIPELINE: &str = "Pipeline";
    /// Explicit device configuration label.
    pub const DEVICE_CONFIGURATION: &str = "Device Configuration";
    /// Average power draw in Watts.
    pub const AVG_POWER: &str = "Avg Power (W)";
    /// Frames per second per Watt.
    pub const EFFICIENCY: &str = "Efficiency (FPS/W)";
}

/// One benchmark run observation.
///
/// String fields are empty when their column was missing. Numeric fields and
/// the device configuration label are `None` when missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Run start time as written by the runner.
    pub timestamp: String,
    /// Host system identifier.
    pub system: String,
    /// Run duration, not interpreted.
    pub duration: String,
    /// Pinned cores descriptor.
    pub cores: String,
    /// Pipeline load tier.
    pub config: String,
    /// Detection stage device.
    pub detect: String,
    /// Classification stage device.
    pub classify: String,
    /// Batch size, integer-valued but kept as text.
    pub batch: String,
    /// Measured throughput (fps).
    pub throughput: Option<f64>,
    /// Throughput per stream (fps).
    pub per_stream: Option<f64>,
    /// Theoretical stream density; may be numeric, `NA` or `NaN`.
    pub theoretical: String,
    /// Measured stream count.
    pub streams: String,
    /// Synthesized pipeline descriptor, see [`pipeline_descriptor`].
    pub pipeline: String,
    /// Explicit device configuration label.
    pub device_config: Option<String>,
    /// Average power draw (W).
    pub avg_power: Option<f64>,
    /// Efficiency (FPS/W).
    pub efficiency: Option<f64>,
}

impl RawRecord {
    /// Device descriptor used for grouping and ordering.
    ///
    /// The explicit device configuration label wins when it is present and
    /// non-empty; otherwise the descriptor is `"{detect}-{classify}"`.
    pub fn device_descriptor(&self) -> String {
        match self.device_config.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("{}-{}", self.detect, self.classify),
        }
    }
}

/// Build the pipeline descriptor from the pipeline-related columns.
///
/// Precedence: both stages, then first stage only, then the generic column.
pub fn pipeline_descriptor(
    pipeline1: Option<&str>,
    pipeline2: Option<&str>,
    pipeline: Option<&str>,
) -> String {
    match (pipeline1, pipeline2) {
        (Some(p1), Some(p2)) => format!("Pipeline1: {p1}... | Pipeline2: {p2}..."),
        (Some(p1), None) => p1.to_string(),
        _ => pipeline.unwrap_or_default().to_string(),
    }
}

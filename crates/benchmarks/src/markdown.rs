// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output generation for report documents.
//!
//! The table mirrors the dashboard's summary view for places that render
//! markdown, such as CI job summaries.

use std::fmt::Write;

use edgebench_core::OutputDocument;

const ABSENT: &str = "-";

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

fn fixed2(value: Option<f64>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| format!("{v:.2}"))
}

/// Generate a markdown summary table from a document.
pub fn generate_summary(document: &OutputDocument) -> String {
    let mut output = String::new();

    writeln!(output, "# Edge Pipeline Benchmark Summary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "| Config | Devices | Detect | Classify | Batch | Runs | Throughput (fps) | Theoretical Streams | Avg Power (W) | Efficiency (FPS/W) |"
    )
    .unwrap();
    writeln!(
        output,
        "|--------|---------|--------|----------|-------|------|------------------|---------------------|---------------|--------------------|"
    )
    .unwrap();

    for row in &document.summary {
        writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            row.config,
            row.device_config,
            row.detect,
            row.classify,
            row.batch,
            row.runs,
            fixed2(row.avg_throughput),
            cell(row.theoretical_streams),
            fixed2(row.avg_power),
            fixed2(row.efficiency),
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total runs: {}", document.raw.len()).unwrap();
    writeln!(output, "Configurations: {}", document.summary.len()).unwrap();

    output
}

// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! The dashboard data document.

use serde::{Deserialize, Serialize};

use crate::record::RawRecord;
use crate::summary::SummaryRow;

/// Top-level JSON document consumed by the dashboard renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    /// Ordered summary rows.
    pub summary: Vec<SummaryRow>,
    /// Every parsed run, in discovery order.
    pub raw: Vec<RawRecord>,
    /// Human-readable generator tag.
    pub generated: String,
    /// Results root last-modified time in fractional Unix seconds, `null`
    /// when the root does not exist.
    pub timestamp: Option<String>,
}

impl OutputDocument {
    /// Generator tag stamped into documents built by this crate version.
    pub fn generator_tag() -> String {
        format!("Generated by edgebench {}", env!("CARGO_PKG_VERSION"))
    }
}

// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-configuration summary statistics.

use serde::{Deserialize, Serialize};

use crate::record::RawRecord;

/// Rank of the canonical pipeline tiers, lightest first.
pub const TIER_RANKS: [(&str, u8); 3] = [("light", 0), ("medium", 1), ("heavy", 2)];

/// Rank given to any tier outside [`TIER_RANKS`].
pub const UNRANKED_TIER: u8 = 99;

/// Sort rank of a pipeline tier. Matching is exact.
pub fn tier_rank(tier: &str) -> u8 {
    TIER_RANKS
        .iter()
        .find(|(name, _)| *name == tier)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED_TIER)
}

/// Composite key runs are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// Pipeline tier.
    pub config: String,
    /// Device descriptor, see [`RawRecord::device_descriptor`].
    pub device: String,
    /// Batch size as written in the result file.
    pub batch: String,
}

impl GroupKey {
    /// Key a record belongs to.
    pub fn for_record(record: &RawRecord) -> Self {
        Self {
            config: record.config.clone(),
            device: record.device_descriptor(),
            batch: record.batch.clone(),
        }
    }
}

/// Statistics for one group of runs sharing a [`GroupKey`].
///
/// Every numeric field is either the rounded mean over the runs that carried
/// a value, or `None` when no run did. `None` serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Pipeline tier.
    pub config: String,
    /// Device descriptor of the group.
    pub device_config: String,
    /// Detection device of the first run in the group.
    pub detect: String,
    /// Classification device of the first run in the group.
    pub classify: String,
    /// Batch size.
    pub batch: String,
    /// Number of runs folded into this row.
    pub runs: usize,
    /// Mean throughput, 2 decimals.
    pub avg_throughput: Option<f64>,
    /// Mean theoretical stream density, nearest integer.
    pub theoretical_streams: Option<i64>,
    /// Mean power draw, 2 decimals.
    pub avg_power: Option<f64>,
    /// Mean efficiency, 2 decimals.
    pub efficiency: Option<f64>,
}

impl SummaryRow {
    /// Grouping key this row was produced from.
    pub fn key(&self) -> GroupKey {
        GroupKey {
            config: self.config.clone(),
            device: self.device_config.clone(),
            batch: self.batch.clone(),
        }
    }
}

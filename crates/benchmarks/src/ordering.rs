// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Presentation order of summary rows.

use std::cmp::Ordering;

use edgebench_core::{tier_rank, SummaryRow};

/// Sort rows by tier rank, device descriptor, then numeric batch size.
///
/// The sort is stable, so rows that compare equal keep their input order.
pub fn sort_summary(rows: &mut [SummaryRow]) {
    rows.sort_by(compare_rows);
}

/// Ordering used by [`sort_summary`].
pub fn compare_rows(a: &SummaryRow, b: &SummaryRow) -> Ordering {
    tier_rank(&a.config)
        .cmp(&tier_rank(&b.config))
        .then_with(|| a.device_config.cmp(&b.device_config))
        .then_with(|| compare_batch(&a.batch, &b.batch))
}

/// Compare batch sizes numerically.
///
/// Batches that are not integers sort after all integer batches, and among
/// themselves as plain strings.
pub fn compare_batch(a: &str, b: &str) -> Ordering {
    match (parse_batch(a), parse_batch(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_batch(batch: &str) -> Option<i64> {
    batch.trim().parse().ok()
}

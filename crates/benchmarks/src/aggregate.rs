// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Folding repeated runs into summary rows.
//!
//! Runs are grouped by [`GroupKey`]. Within a group each numeric statistic is
//! the mean over the runs that reported it; a statistic nobody reported
//! stays `None` instead of collapsing to zero.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use edgebench_core::{GroupKey, RawRecord, SummaryRow};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use tracing::{debug, warn};

/// Group records and reduce each group to a summary row.
///
/// Rows come out in first-seen group order; see
/// [`crate::ordering::sort_summary`] for the presentation order.
pub fn aggregate(records: &[RawRecord]) -> Vec<SummaryRow> {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut groups: HashMap<GroupKey, Vec<&RawRecord>> = HashMap::new();

    for record in records {
        match groups.entry(GroupKey::for_record(record)) {
            Entry::Occupied(mut entry) => entry.get_mut().push(record),
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(vec![record]);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let runs = groups.remove(&key)?;
            Some(summarize_group(key, &runs))
        })
        .collect()
}

/// Reduce the runs of one group.
///
/// `runs` must be non-empty. Detect and classify devices are taken from the
/// first run; a later run that disagrees is reported but does not change the
/// row.
pub fn summarize_group(key: GroupKey, runs: &[&RawRecord]) -> SummaryRow {
    let (detect, classify) = runs
        .first()
        .map(|r| (r.detect.clone(), r.classify.clone()))
        .unwrap_or_default();

    if let Some(odd) = runs
        .iter()
        .find(|r| r.detect != detect || r.classify != classify)
    {
        warn!(
            config = %key.config,
            device = %key.device,
            batch = %key.batch,
            "group mixes devices: keeping {}/{} over {}/{}",
            detect,
            classify,
            odd.detect,
            odd.classify
        );
    }

    let throughput: Vec<f64> = runs.iter().filter_map(|r| r.throughput).collect();
    let power: Vec<f64> = runs.iter().filter_map(|r| r.avg_power).collect();
    let efficiency: Vec<f64> = runs.iter().filter_map(|r| r.efficiency).collect();
    let theoretical: Vec<f64> = runs
        .iter()
        .filter_map(|r| theoretical_value(&r.theoretical))
        .collect();

    SummaryRow {
        config: key.config,
        device_config: key.device,
        detect,
        classify,
        batch: key.batch,
        runs: runs.len(),
        avg_throughput: mean(&throughput).map(round2),
        theoretical_streams: mean(&theoretical).map(|m| m.round_ties_even() as i64),
        avg_power: mean(&power).map(round2),
        efficiency: mean(&efficiency).map(round2),
    }
}

/// Numeric value of a theoretical stream density cell.
///
/// Empty, `NA` and `NaN` cells are not samples. Anything else that does not
/// parse to a finite number is dropped.
pub fn theoretical_value(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan") {
        return None;
    }
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!(value = raw, "ignoring unparseable theoretical stream density");
            None
        }
    }
}

/// Arithmetic mean, `None` for no samples.
///
/// The sum and division are carried out exactly and the result is rounded
/// once to the nearest `f64`, so the value does not depend on sample order
/// and rounds the same way as an exact mean at two decimals.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Some(values.iter().sum::<f64>() / values.len() as f64);
    }

    let parts: Vec<(BigInt, i32)> = values.iter().map(|&v| decompose(v)).collect();
    let min_exp = parts.iter().map(|(_, exp)| *exp).min()?;
    let sum: BigInt = parts
        .into_iter()
        .map(|(mantissa, exp)| mantissa << (exp - min_exp) as usize)
        .sum();
    Some(ratio_to_f64(sum, &BigInt::from(values.len()), min_exp))
}

/// Split a finite float into `mantissa * 2^exp`.
fn decompose(value: f64) -> (BigInt, i32) {
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & 0x000f_ffff_ffff_ffff;
    let (mantissa, exp) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased - 1075)
    };
    let mantissa = BigInt::from(mantissa);
    if bits >> 63 == 1 {
        (-mantissa, exp)
    } else {
        (mantissa, exp)
    }
}

/// Nearest `f64` to `num / den * 2^exp`, ties to even. `den` is positive.
fn ratio_to_f64(num: BigInt, den: &BigInt, exp: i32) -> f64 {
    if num.is_zero() {
        return 0.0;
    }
    let negative = num.is_negative();
    let num = num.abs();

    // Pick `shift` so the quotient carries exactly 53 significant bits.
    let mut shift = num.bits() as i64 - den.bits() as i64 - 53;
    let (quotient, remainder, divisor) = loop {
        let (n, d) = if shift >= 0 {
            (num.clone(), den << shift as usize)
        } else {
            (&num << (-shift) as usize, den.clone())
        };
        let q = &n / &d;
        if q.bits() > 53 {
            shift += 1;
            continue;
        }
        let r = n - &q * &d;
        break (q, r, d);
    };

    let mut mantissa = quotient.to_u64().unwrap_or(u64::MAX);
    match (remainder << 1usize).cmp(&divisor) {
        Ordering::Greater => mantissa += 1,
        Ordering::Equal if mantissa & 1 == 1 => mantissa += 1,
        _ => {}
    }

    let magnitude = mantissa as f64 * 2f64.powi((shift + exp as i64) as i32);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Round to two decimals, ties to even on the exact decimal expansion.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: &str, detect: &str, classify: &str, batch: &str) -> RawRecord {
        RawRecord {
            config: config.into(),
            detect: detect.into(),
            classify: classify.into(),
            batch: batch.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mean_and_rounding() {
        let mut a = run("light", "GPU", "GPU", "1");
        a.throughput = Some(100.0);
        let mut b = a.clone();
        b.throughput = Some(100.125);
        let mut c = a.clone();
        c.throughput = Some(100.2);
        let mut d = a.clone();
        d.throughput = None;

        let rows = aggregate(&[a, b, c, d]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].runs, 4);
        assert_eq!(rows[0].avg_throughput, Some(100.11));
        assert_eq!(rows[0].avg_power, None);
        assert_eq!(rows[0].efficiency, None);
    }

    #[test]
    fn test_zero_is_not_absent() {
        let mut a = run("light", "CPU", "CPU", "1");
        a.avg_power = Some(0.0);
        let rows = aggregate(&[a]);
        assert_eq!(rows[0].avg_power, Some(0.0));
    }

    #[test]
    fn test_theoretical_reduction() {
        let values = ["4", "NA", "nan", "", "abc", "5", "NaN"];
        let records: Vec<RawRecord> = values
            .iter()
            .map(|v| RawRecord {
                theoretical: v.to_string(),
                ..run("heavy", "NPU", "NPU", "2")
            })
            .collect();

        let rows = aggregate(&records);
        assert_eq!(rows[0].runs, 7);
        // mean(4, 5) = 4.5, ties to even
        assert_eq!(rows[0].theoretical_streams, Some(4));
    }

    #[test]
    fn test_theoretical_absent_without_samples() {
        let records = vec![
            RawRecord {
                theoretical: "NA".into(),
                ..run("light", "GPU", "GPU", "1")
            },
            run("light", "GPU", "GPU", "1"),
        ];
        assert_eq!(aggregate(&records)[0].theoretical_streams, None);
    }

    #[test]
    fn test_theoretical_value_rejects_non_finite() {
        assert_eq!(theoretical_value("inf"), None);
        assert_eq!(theoretical_value(" 7.6 "), Some(7.6));
    }

    #[test]
    fn test_grouping_by_label_and_batch() {
        let labeled = RawRecord {
            device_config: Some("dGPU".into()),
            ..run("light", "GPU.1", "GPU.1", "1")
        };
        let records = vec![
            labeled.clone(),
            run("light", "GPU.1", "GPU.1", "1"),
            labeled,
            run("light", "GPU.1", "GPU.1", "01"),
        ];

        let rows = aggregate(&records);
        let counts: Vec<(&str, &str, usize)> = rows
            .iter()
            .map(|r| (r.device_config.as_str(), r.batch.as_str(), r.runs))
            .collect();
        assert_eq!(
            counts,
            vec![("dGPU", "1", 2), ("GPU.1-GPU.1", "1", 1), ("GPU.1-GPU.1", "01", 1)]
        );
    }

    #[test]
    fn test_first_record_wins_for_devices() {
        let records = vec![
            RawRecord {
                device_config: Some("mixed".into()),
                ..run("medium", "GPU", "NPU", "4")
            },
            RawRecord {
                device_config: Some("mixed".into()),
                ..run("medium", "CPU", "CPU", "4")
            },
        ];
        let rows = aggregate(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].detect.as_str(), rows[0].classify.as_str()), ("GPU", "NPU"));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(2.345678), 2.35);
        assert_eq!(round2(-3.14159), -3.14);
    }

    #[test]
    fn test_mean_is_exact_before_rounding() {
        // A naive running sum lands on the upper side of 246.145.
        let records: Vec<RawRecord> = [264.2, 322.5, 157.68, 240.2]
            .iter()
            .map(|&fps| RawRecord {
                throughput: Some(fps),
                ..run("light", "GPU", "GPU", "1")
            })
            .collect();
        assert_eq!(aggregate(&records)[0].avg_throughput, Some(246.14));
    }

    #[test]
    fn test_mean_independent_of_order() {
        let values = [0.1, 1e16, -1e16, 0.2, 0.3];
        let reversed: Vec<f64> = values.iter().rev().copied().collect();
        assert_eq!(mean(&values), mean(&reversed));
        assert_eq!(mean(&values), Some(0.12));
        assert_eq!(mean(&[-1.5, -2.5]), Some(-2.0));
        assert_eq!(mean(&[0.0, -0.0]), Some(0.0));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0]), Some(1.5));
    }
}

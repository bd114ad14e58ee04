// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Data model for edge pipeline benchmark reports.
//!
//! This crate holds the types shared by the ingestion pipeline and the
//! command-line front end:
//!
//! - [`record`] - one parsed benchmark run ([`RawRecord`]) and the result-file
//!   column vocabulary
//! - [`summary`] - per-configuration statistics ([`SummaryRow`]) and the
//!   grouping key they are folded under
//! - [`document`] - the JSON document handed to the dashboard
//!
//! The types do no I/O. Absent measurements are carried as `Option` all the
//! way to serialization, where they become `null`.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod document;
pub mod record;
pub mod summary;

pub use document::OutputDocument;
pub use record::RawRecord;
pub use summary::{tier_rank, GroupKey, SummaryRow};

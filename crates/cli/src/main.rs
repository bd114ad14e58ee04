// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Edge Bench CLI entry point.

fn main() {
    if let Err(e) = edgebench_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

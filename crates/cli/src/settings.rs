// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Layered settings for the report command.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. `edgebench.toml` in the working directory (optional)
//! 3. `EDGEBENCH_*` environment variables, e.g. `EDGEBENCH_RESULTS_DIR`
//!
//! Command-line flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use edgebench_benchmarks::{io, ReportOptions};
use serde::{Deserialize, Serialize};

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "edgebench.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "EDGEBENCH";

/// Report settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Results root to scan.
    pub results_dir: PathBuf,
    /// Data document destination.
    pub output_path: PathBuf,
    /// Also write the markdown summary.
    pub markdown: bool,
    /// Markdown summary destination.
    pub markdown_path: PathBuf,
}

impl Settings {
    /// Load settings from [`CONFIG_FILE`] and the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load settings using `file` instead of [`CONFIG_FILE`].
    pub fn load_from(file: &Path) -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .set_default("results_dir", io::DEFAULT_RESULTS_DIR)?
            .set_default("output_path", io::DEFAULT_OUTPUT_PATH)?
            .set_default("markdown", false)?
            .set_default("markdown_path", io::DEFAULT_MARKDOWN_PATH)?
            .add_source(::config::File::from(file).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Options for a report run.
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            results_dir: self.results_dir.clone(),
            output_path: self.output_path.clone(),
            markdown_path: self.markdown.then(|| self.markdown_path.clone()),
        }
    }
}

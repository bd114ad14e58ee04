// Copyright 2025 Edge Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for Edge Bench.
//!
//! This crate provides the command-line interface that turns a results
//! directory into the dashboard data document. Running `edgebench` with no
//! arguments is the same as `edgebench run`.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod settings;

use std::fmt::Write;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use edgebench_benchmarks::{generate_report, io};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

/// Edge Bench CLI.
#[derive(Parser, Debug)]
#[command(name = "edgebench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: run).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate benchmark results into the dashboard data file.
    ///
    /// Scans every configuration directory under the results root, parses
    /// the e2e-edge-pipeline_*.csv files and writes the summary and raw
    /// records as one JSON document.
    Run {
        /// Results root override.
        #[arg(short, long)]
        results_dir: Option<PathBuf>,

        /// Data document path override.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the markdown summary.
        #[arg(short, long)]
        markdown: bool,
    },

    /// Show configured paths and the state of the results root.
    Status {
        /// Also summarize the existing data document.
        #[arg(short, long)]
        detailed: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "edgebench=debug"
    } else {
        "edgebench=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails. An empty
/// or missing results directory is an error.
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load().context("failed to load settings")?;
    debug!(?settings, "loaded settings");

    match cli.command.unwrap_or(Commands::Run {
        results_dir: None,
        output: None,
        markdown: false,
    }) {
        Commands::Run {
            results_dir,
            output,
            markdown,
        } => run_report(settings, results_dir, output, markdown),
        Commands::Status { detailed } => show_status(&settings, detailed),
    }
}

fn run_report(
    mut settings: Settings,
    results_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    markdown: bool,
) -> anyhow::Result<()> {
    if let Some(dir) = results_dir {
        settings.results_dir = dir;
    }
    if let Some(path) = output {
        settings.output_path = path;
    }
    settings.markdown |= markdown;

    let result = match generate_report(&settings.report_options()) {
        Ok(result) => result,
        Err(e) if e.is_empty_corpus() => {
            let hint = format!(
                "No benchmark CSV files found in {}/. Run benchmarks first.",
                settings.results_dir.display()
            );
            return Err(anyhow::Error::new(e).context(hint));
        }
        Err(e) => return Err(anyhow::Error::new(e).context("failed to generate report")),
    };

    println!(
        "Processed {} records into {} summary entries",
        result.records, result.summary_rows
    );
    println!("Data file: {}", result.output_path.display());
    if let Some(path) = &result.markdown_path {
        println!("Markdown summary: {}", path.display());
    }
    if result.skipped_files > 0 {
        println!("Skipped {} unreadable result files", result.skipped_files);
    }
    Ok(())
}

fn show_status(settings: &Settings, detailed: bool) -> anyhow::Result<()> {
    print!("{}", status_report(settings, detailed)?);
    Ok(())
}

fn status_report(settings: &Settings, detailed: bool) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "Edge Bench Report")?;
    writeln!(out, "Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Results directory: {}", settings.results_dir.display())?;
    writeln!(out, "Data file: {}", settings.output_path.display())?;

    match io::corpus_modified(&settings.results_dir) {
        Some(modified) => {
            let modified: DateTime<Utc> = modified.into();
            writeln!(out, "Results last modified: {}", modified.to_rfc3339())?;
        }
        None => writeln!(out, "Results directory does not exist")?,
    }

    if detailed {
        if settings.output_path.exists() {
            let document = io::read_output_document(&settings.output_path)
                .with_context(|| format!("failed to read {}", settings.output_path.display()))?;
            writeln!(out, "\nData file contents:")?;
            writeln!(out, "  - {}", document.generated)?;
            writeln!(out, "  - {} raw records", document.raw.len())?;
            writeln!(out, "  - {} summary entries", document.summary.len())?;
        } else {
            writeln!(out, "\nData file has not been generated yet")?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use edgebench_benchmarks::{build_document, RawRecord};

    fn settings_in(dir: &std::path::Path) -> Settings {
        Settings {
            results_dir: dir.join("results"),
            output_path: dir.join("data.json"),
            markdown: false,
            markdown_path: dir.join("summary.md"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_valid() {
        let cli = Cli::try_parse_from(["edgebench"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_run_overrides() {
        let cli =
            Cli::try_parse_from(["edgebench", "run", "-r", "res", "-o", "out.json", "-m", "-v"])
                .unwrap();
        match cli.command {
            Some(Commands::Run {
                results_dir,
                output,
                markdown,
            }) => {
                assert_eq!(results_dir, Some(PathBuf::from("res")));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(markdown);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn test_run_report_empty_corpus_hint() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let err = run_report(settings, None, None, false).unwrap_err();
        assert!(err.to_string().contains("Run benchmarks first"));
        assert!(!dir.path().join("data.json").exists());
    }

    #[test]
    fn test_status_missing_results_root() {
        let dir = tempfile::tempdir().unwrap();
        let report = status_report(&settings_in(dir.path()), true).unwrap();

        assert!(report.starts_with("Edge Bench Report\n"));
        assert!(report.contains(&format!("Version: {}", env!("CARGO_PKG_VERSION"))));
        assert!(report.contains("Results directory does not exist"));
        assert!(report.contains("Data file has not been generated yet"));
        assert!(!report.contains("Results last modified"));
    }

    #[test]
    fn test_status_summary_only_when_detailed() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        std::fs::create_dir(&settings.results_dir).unwrap();

        let report = status_report(&settings, false).unwrap();
        assert!(report.contains("Results last modified: "));
        assert!(!report.contains("Data file has not been generated yet"));
        assert!(!report.contains("Data file contents"));
    }

    #[test]
    fn test_status_detailed_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        std::fs::create_dir(&settings.results_dir).unwrap();

        let run = |config: &str, batch: &str| RawRecord {
            config: config.to_string(),
            detect: "GPU".to_string(),
            classify: "NPU".to_string(),
            batch: batch.to_string(),
            throughput: Some(120.0),
            ..RawRecord::default()
        };
        let records = vec![run("light", "1"), run("light", "1"), run("heavy", "8")];
        let document = build_document(&settings.results_dir, records);
        io::write_output_document(&document, &settings.output_path).unwrap();

        let report = status_report(&settings, true).unwrap();
        assert!(report.contains("Results last modified: "));
        assert!(report.contains("\nData file contents:\n"));
        assert!(report.contains(&format!("  - {}\n", document.generated)));
        assert!(report.contains("  - 3 raw records\n"));
        assert!(report.contains("  - 2 summary entries\n"));
    }

    #[test]
    fn test_status_unreadable_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        std::fs::write(&settings.output_path, "not json").unwrap();

        let err = status_report(&settings, true).unwrap_err();
        assert!(err.to_string().starts_with("failed to read "));
    }
}

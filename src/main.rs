//! Binary entry point for rosterload.
//!
//! This binary provides the CLI interface for importing roster datasets.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rosterload::config::RosterConfig;
use rosterload::io::{
    CsvControl, ImportService, ImporterRegistry, ManifestResolver, ManifestSummary,
};
use rosterload::observability::{self, LoggingConfig};
use rosterload::{OptionOverrides, RowWidthPolicy};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Rosterload - manifest-driven import of roster CSV datasets.
#[derive(Parser)]
#[command(name = "rosterload")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "ROSTERLOAD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Import a single file and print its records as JSON.
    Import {
        /// The file to import.
        file: PathBuf,

        /// Record type, e.g. `users` or `manifest`.
        #[arg(short = 't', long = "type")]
        record_type: String,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Import every file a dataset's manifest declares present.
    ImportDir {
        /// The dataset directory.
        dir: PathBuf,

        /// Print all records as JSON instead of a per-type summary.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// List the record types a dataset's manifest declares present.
    Detect {
        /// The dataset directory.
        dir: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// Per-call option overrides.
#[derive(Args, Debug, Default)]
struct OverrideArgs {
    /// Format version selecting the importer set.
    #[arg(long = "format-version")]
    version: Option<String>,

    /// Field delimiter.
    #[arg(long)]
    delimiter: Option<char>,

    /// Quote character.
    #[arg(long)]
    quote: Option<char>,

    /// Escape character.
    #[arg(long)]
    escape: Option<char>,

    /// Pad or truncate rows whose width differs from the header.
    #[arg(long)]
    lenient: bool,
}

impl OverrideArgs {
    /// Converts the flags to overrides on top of `base` controls.
    fn into_overrides(self, base: Option<CsvControl>) -> OptionOverrides {
        let mut overrides = OptionOverrides::default();
        if let Some(version) = self.version {
            overrides = overrides.version(version);
        }
        if self.delimiter.is_some() || self.quote.is_some() || self.escape.is_some() {
            let mut control = base.unwrap_or_default();
            if let Some(c) = self.delimiter {
                control = control.with_delimiter(c);
            }
            if let Some(c) = self.quote {
                control = control.with_quote(c);
            }
            if let Some(c) = self.escape {
                control = control.with_escape(c);
            }
            overrides = overrides.csv_control(control);
        }
        if self.lenient {
            overrides = overrides.row_width(RowWidthPolicy::Lenient);
        }
        overrides
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) =
        observability::init(LoggingConfig::from_settings(Some(&config.logging), cli.verbose))
    {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration from an explicit path or the default location.
fn load_config(path: Option<&Path>) -> anyhow::Result<RosterConfig> {
    match path {
        Some(path) => RosterConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(RosterConfig::load_default()),
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: RosterConfig) -> anyhow::Result<()> {
    let base_control = config.import.csv_control;
    let service =
        ImportService::new(ImporterRegistry::with_builtin()).with_defaults(config.import);

    match command {
        Commands::Import {
            file,
            record_type,
            overrides,
        } => cmd_import(&service, &file, &record_type, overrides.into_overrides(base_control)),

        Commands::ImportDir {
            dir,
            json,
            overrides,
        } => cmd_import_dir(&service, &dir, json, overrides.into_overrides(base_control)),

        Commands::Detect { dir, overrides } => {
            cmd_detect(&service, &dir, overrides.into_overrides(base_control))
        },
    }
}

/// Import command.
fn cmd_import(
    service: &ImportService,
    file: &Path,
    record_type: &str,
    overrides: OptionOverrides,
) -> anyhow::Result<()> {
    let result = service
        .import(file, record_type, &overrides)
        .with_context(|| format!("importing {} as {record_type}", file.display()))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Directory import command.
fn cmd_import_dir(
    service: &ImportService,
    dir: &Path,
    json: bool,
    overrides: OptionOverrides,
) -> anyhow::Result<()> {
    let imported = service
        .import_directory(dir, &overrides)
        .with_context(|| format!("importing dataset {}", dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&imported)?);
        return Ok(());
    }

    if imported.is_empty() {
        println!("No record types present in manifest.");
        return Ok(());
    }

    println!("{:<20} {:>8}", "TYPE", "RECORDS");
    for (record_type, result) in imported.iter() {
        println!("{record_type:<20} {:>8}", result.len());
    }
    println!("{:<20} {:>8}", "total", imported.total_records());
    Ok(())
}

/// Detect command.
fn cmd_detect(service: &ImportService, dir: &Path, overrides: OptionOverrides) -> anyhow::Result<()> {
    let manifest = service
        .import_manifest(dir, &overrides)
        .with_context(|| format!("reading manifest in {}", dir.display()))?;
    let types = ManifestResolver::detect_types(&manifest)?;
    let summary = ManifestSummary::from_result(&manifest);

    if let Some(version) = &summary.manifest_version {
        println!("manifest.version: {version}");
    }
    if let Some(version) = &summary.oneroster_version {
        println!("oneroster.version: {version}");
    }
    if types.is_empty() {
        println!("No record types present.");
    }
    for record_type in &types {
        println!("{record_type}");
    }
    Ok(())
}

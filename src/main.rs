//! `license-ledgr` — collect third-party dependency licenses into a CSV ledger.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Enumerate the workspace's packages ([`enumerator`]).
//! 4. Resolve licenses the input does not carry against the package registry
//!    ([`registry`]), one package at a time with a fixed inter-call delay.
//! 5. Normalize license names to SPDX identifiers ([`license`]).
//! 6. Append the batch to the ledger ([`ledger`]) and print a summary
//!    ([`report`]).
//!
//! Enumeration failures abort the run before anything is written; a package
//! whose license cannot be resolved gets an empty license field and the run
//! keeps going.

mod cli;
mod config;
mod enumerator;
mod ledger;
mod license;
mod models;
mod registry;
mod report;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Command};
use config::{load_config, Config};
use enumerator::dotnet::DotNetEnumerator;
use enumerator::maven::MavenEnumerator;
use enumerator::Enumerator;
use models::LedgerRow;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Dotnet { path } => run_dotnet(&cli, path).await,
        Command::Maven { path, report } => run_maven(&cli, path, report.clone()),
    }
}

/// Tally a .NET workspace: enumerate via `dotnet list package`, resolve each
/// package's license against nuget.org, append the batch to the ledger.
async fn run_dotnet(cli: &Cli, path: &Path) -> Result<()> {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let config = load_config(&path, cli.config.as_deref())?;
    let component = component_name(cli, &path);

    let packages = DotNetEnumerator::new().enumerate(&path)?;

    if !cli.quiet {
        eprintln!(
            "  {} {} packages to resolve",
            "→".cyan(),
            packages.len()
        );
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let pb = if !cli.quiet {
        let pb = ProgressBar::new(packages.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let delay = Duration::from_millis(config.resolver.delay_ms);
    let mut rows = Vec::with_capacity(packages.len());

    for package in &packages {
        let raw = match config.resolver.overrides.get(&package.name) {
            Some(license) => license.clone(),
            None => registry::nuget::resolve(&client, &package.name, &package.version).await,
        };

        rows.push(LedgerRow {
            component: component.clone(),
            origin: package.origin(),
            license: apply_mapping(&config, &raw),
            copyright: String::new(),
        });

        if let Some(pb) = &pb {
            pb.inc(1);
        }

        // polite pacing toward the public registry
        tokio::time::sleep(delay).await;
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    ledger::append(&cli.ledger, &rows)?;
    report::render(&rows, &cli.ledger, cli.verbose, cli.quiet);

    Ok(())
}

/// Convert a Maven license report into ledger rows. The report already
/// carries license names, so no registry calls are made.
fn run_maven(cli: &Cli, path: &Path, report_override: Option<PathBuf>) -> Result<()> {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let config = load_config(&path, cli.config.as_deref())?;
    let component = component_name(cli, &path);

    let packages = MavenEnumerator::new(report_override).enumerate(&path)?;

    let rows: Vec<LedgerRow> = packages
        .iter()
        .map(|package| LedgerRow {
            component: component.clone(),
            origin: package.origin(),
            license: apply_mapping(&config, package.license_raw.as_deref().unwrap_or_default()),
            copyright: String::new(),
        })
        .collect();

    ledger::append(&cli.ledger, &rows)?;
    report::render(&rows, &cli.ledger, cli.verbose, cli.quiet);

    Ok(())
}

/// Config-supplied mapping entries take precedence over the built-in table.
fn apply_mapping(config: &Config, raw: &str) -> String {
    if let Some(mapped) = config.licenses.get(raw) {
        return mapped.clone();
    }
    license::spdx::normalize(raw)
}

/// `--component` wins; otherwise the workspace directory name.
fn component_name(cli: &Cli, path: &Path) -> String {
    cli.component.clone().unwrap_or_else(|| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    })
}

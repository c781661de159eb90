//! passdiff - Compare two password-manager CSV exports
//!
//! Reads both files completely, diffs the normalized credential tables,
//! and prints a plain-text report of conflicts and unique entries.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use passdiff::{load, render, DiffEngine};

/// Compare two password CSV files for conflicts and differences
#[derive(Parser)]
#[command(
    name = "passdiff",
    version,
    about = "Compare two password CSV files for conflicts and differences",
    long_about = "Compares two credential exports keyed by normalized (url, username) pairs.\n\n\
                  Reports:\n\
                  • Entries present in both files with different passwords\n\
                  • Entries unique to the first file\n\
                  • Entries unique to the second file"
)]
struct Cli {
    /// Path to the first CSV file (e.g. 'Chrome Passwords.csv')
    file1: PathBuf,

    /// Path to the second CSV file (e.g. 'Microsoft Edge Passwords.csv')
    file2: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbosity {
            0 => EnvFilter::new("passdiff=warn"),
            1 => EnvFilter::new("passdiff=info"),
            2 => EnvFilter::new("passdiff=debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so the report on stdout stays clean.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let left = load(&cli.file1)?;
    info!(
        "loaded {} entries from '{}' ({} rows skipped)",
        left.len(),
        cli.file1.display(),
        left.skipped_rows()
    );

    let right = load(&cli.file2)?;
    info!(
        "loaded {} entries from '{}' ({} rows skipped)",
        right.len(),
        cli.file2.display(),
        right.skipped_rows()
    );

    let result = DiffEngine::diff(&left, &right);
    let report = render(
        &result,
        &cli.file1.display().to_string(),
        &cli.file2.display().to_string(),
    );
    println!("{report}");

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => {
            // The loader already logged the specific diagnostic.
            eprintln!(
                "{}",
                "Comparison could not be completed due to an error.".red()
            );
            ExitCode::FAILURE
        }
    }
}

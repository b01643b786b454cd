//! energy-etl CLI - Reshape World Bank energy extracts
//!
//! # Commands
//!
//! ```bash
//! energy-etl                       # Same as `energy-etl reshape`
//! energy-etl reshape               # Long extract -> wide multi-year CSV
//! energy-etl filter                # Keep countries with known centroids
//! energy-etl compare --year 2020   # Diff country sets of two wide CSVs
//! ```
//!
//! Paths default to fixed file names inside `ENERGY_ETL_DATA_DIR`
//! (or the current directory).

use clap::{Parser, Subcommand};
use energy_etl::{
    compare_files, filter_file, reshape_file, CompareOptions, DataPaths, FilterOptions,
    PipelineResult, ReshapeOptions,
};
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "energy-etl")]
#[command(about = "Reshape, filter and compare World Bank energy CSV extracts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// The requested command; no subcommand means `reshape` with defaults.
    fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Reshape {
            input: None,
            output: None,
            summary: None,
        })
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reshape the long World Bank extract into one row per country and year
    Reshape {
        /// Long-format input CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Wide output CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the report as JSON
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Keep only countries present in the centroid file
    Filter {
        /// Wide input CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Centroid CSV with a COUNTRY column
        #[arg(short, long)]
        centroids: Option<PathBuf>,

        /// Filtered output CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the country sets of two wide CSVs
    Compare {
        /// Reference CSV (all rows)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Candidate CSV (restricted to --year)
        #[arg(short, long)]
        candidate: Option<PathBuf>,

        /// Year the candidate rows must have
        #[arg(short, long, default_value = "2020")]
        year: i32,

        /// Compare all candidate rows regardless of year
        #[arg(long, conflicts_with = "year")]
        all_years: bool,
    },
}

fn main() {
    let command = Cli::parse().into_command();
    let paths = DataPaths::from_env();

    if let Err(e) = run(command, &paths) {
        for line in error_report(&e) {
            eprintln!("{}", line);
        }
        std::process::exit(1);
    }
}

/// The error followed by its chain of causes, one line each.
fn error_report(error: &dyn Error) -> Vec<String> {
    let mut lines = vec![format!("❌ Error: {}", error)];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("   caused by: {}", cause));
        source = cause.source();
    }
    lines
}

fn run(command: Commands, paths: &DataPaths) -> PipelineResult<()> {
    match command {
        Commands::Reshape { input, output, summary } => {
            let defaults = ReshapeOptions::from_paths(paths);
            let options = ReshapeOptions {
                input: input.unwrap_or(defaults.input),
                output: output.unwrap_or(defaults.output),
                summary,
            };
            reshape_file(&options)?;
        }

        Commands::Filter { input, centroids, output } => {
            let defaults = FilterOptions::from_paths(paths);
            let options = FilterOptions {
                input: input.unwrap_or(defaults.input),
                centroids: centroids.unwrap_or(defaults.centroids),
                output: output.unwrap_or(defaults.output),
            };
            filter_file(&options)?;
        }

        Commands::Compare { reference, candidate, year, all_years } => {
            let defaults = CompareOptions::from_paths(paths);
            let options = CompareOptions {
                reference: reference.unwrap_or(defaults.reference),
                candidate: candidate.unwrap_or(defaults.candidate),
                year: if all_years { None } else { Some(year) },
            };
            compare_files(&options)?;
        }
    }

    Ok(())
}

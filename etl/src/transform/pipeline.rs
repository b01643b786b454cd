//! File-to-file reshape pipeline.
//!
//! Reads the long World Bank extract, reshapes it, writes the wide CSV and
//! prints the report.
//!
//! # Example
//!
//! ```rust,no_run
//! use energy_etl::transform::pipeline::{reshape_file, ReshapeOptions};
//!
//! let summary = reshape_file(&ReshapeOptions::default())?;
//! println!("{} rows written", summary.output_rows);
//! # Ok::<(), energy_etl::PipelineError>(())
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::reshape::{reshape_table, ReshapeOutcome};
use super::years::year_range;
use crate::config::DataPaths;
use crate::error::{PipelineResult, ReshapeError};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{WideRecord, OUTPUT_HEADERS};
use crate::parser::{read_table, write_records};

/// Rows shown in the report sample.
pub const SAMPLE_ROWS: usize = 10;

/// Options for the reshape pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapeOptions {
    /// Long-format World Bank extract
    pub input: PathBuf,
    /// Wide CSV to write
    pub output: PathBuf,
    /// Also write the summary as JSON here
    pub summary: Option<PathBuf>,
}

impl ReshapeOptions {
    pub fn from_paths(paths: &DataPaths) -> Self {
        Self {
            input: paths.world_bank_extract(),
            output: paths.multi_year(),
            summary: None,
        }
    }
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self::from_paths(&DataPaths::default())
    }
}

/// Everything the reshape report prints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReshapeSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Year columns found in the input header
    pub years_found: usize,
    /// First and last year among the input columns
    pub input_years: Option<(i32, i32)>,
    pub country_groups: usize,
    pub countries_with_all_metrics: usize,
    pub countries_with_data: usize,
    pub output_rows: usize,
    /// First and last year present in the output
    pub output_years: Option<(i32, i32)>,
    pub rows_per_year: BTreeMap<i32, usize>,
    pub skipped_missing: usize,
    pub skipped_non_numeric: usize,
    /// First rows of the output
    pub sample: Vec<WideRecord>,
}

impl ReshapeSummary {
    fn from_outcome(outcome: &ReshapeOutcome, input: &Path, output: &Path) -> Self {
        let mut rows_per_year = BTreeMap::new();
        for record in &outcome.records {
            *rows_per_year.entry(record.year).or_insert(0) += 1;
        }

        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            years_found: outcome.year_columns.len(),
            input_years: year_range(outcome.year_columns.iter().map(|c| c.year)),
            country_groups: outcome.stats.country_groups,
            countries_with_all_metrics: outcome.stats.complete_countries,
            countries_with_data: outcome.stats.countries_with_data,
            output_rows: outcome.records.len(),
            output_years: year_range(outcome.records.iter().map(|r| r.year)),
            rows_per_year,
            skipped_missing: outcome.stats.skipped_missing,
            skipped_non_numeric: outcome.stats.skipped_non_numeric,
            sample: outcome.records.iter().take(SAMPLE_ROWS).cloned().collect(),
        }
    }
}

/// Reshape the input file into the output file.
///
/// The output is built fully in memory and written in one pass; on failure
/// the output file may be missing or partially written.
pub fn reshape_file(options: &ReshapeOptions) -> PipelineResult<ReshapeSummary> {
    log_info(format!("📖 Reading {}...", options.input.display()));
    let table = read_table(&options.input)?;

    let outcome = reshape_table(&table)?;
    let summary = ReshapeSummary::from_outcome(&outcome, &options.input, &options.output);

    print_input_stats(&summary);
    print_transform_result(&summary);

    write_wide_csv(&options.output, &outcome.records)?;
    log_success(format!("💾 Saved to: {}", options.output.display()));

    print_rows_per_year(&summary);

    if let Some(ref path) = options.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json)?;
        log_success(format!("Summary written to: {}", path.display()));
    }

    Ok(summary)
}

/// Write reshaped records with the fixed wide header.
pub fn write_wide_csv(path: &Path, records: &[WideRecord]) -> Result<(), ReshapeError> {
    write_records(path, &OUTPUT_HEADERS, records)?;
    Ok(())
}

fn print_input_stats(summary: &ReshapeSummary) {
    if let Some((first, last)) = summary.input_years {
        log_success(format!("Found {} years: {} to {}", summary.years_found, first, last));
    }
    log_success(format!("Found {} countries", summary.country_groups));
    log_success(format!(
        "{} countries have all three metrics",
        summary.countries_with_all_metrics
    ));
}

fn print_transform_result(summary: &ReshapeSummary) {
    log_info("⚙️  Transformation complete:");
    log_info_indent(format!("Countries with data: {}", summary.countries_with_data), 1);
    log_info_indent(format!("Total rows: {}", summary.output_rows), 1);
    if let Some((first, last)) = summary.output_years {
        log_info_indent(format!("Years covered: {} to {}", first, last), 1);
    }

    let skipped = summary.skipped_missing + summary.skipped_non_numeric;
    if skipped > 0 {
        log_warning(format!(
            "{} country-years skipped ({} missing, {} non-numeric)",
            skipped, summary.skipped_missing, summary.skipped_non_numeric
        ));
    }

    log_info(format!("Sample data (first {} rows):", SAMPLE_ROWS));
    for row in &summary.sample {
        log_info_indent(
            format!("{}, {}: Power={:.2}", row.country_name, row.year, row.electric_power),
            1,
        );
    }
}

fn print_rows_per_year(summary: &ReshapeSummary) {
    log_info("📊 Countries per year:");
    for (year, count) in &summary.rows_per_year {
        log_info_indent(format!("{}: {} countries", year, count), 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CsvError, PipelineError};

    const LONG_CSV: &str = "\
Country Name,Country Code,Series Name,Series Code,2020 [YR2020],2021 [YR2021]
Testland,TST,Electric power consumption (kWh per capita),EG.USE.ELEC.KH.PC,100.5,110.0
Testland,TST,Energy use (kg of oil equivalent per capita),EG.USE.PCAP.KG.OE,..,50.0
Testland,TST,Total greenhouse gas emissions including LULUCF (Mt CO2e),EN.GHG.ALL.LU.MT.CE.AR5,2.3,2.5
Partial,PRT,Electric power consumption (kWh per capita),EG.USE.ELEC.KH.PC,1.0,2.0
Partial,PRT,Energy use (kg of oil equivalent per capita),EG.USE.PCAP.KG.OE,3.0,4.0
";

    fn options(dir: &Path) -> ReshapeOptions {
        let input = dir.join("long.csv");
        fs::write(&input, LONG_CSV).unwrap();
        ReshapeOptions {
            input,
            output: dir.join("wide.csv"),
            summary: None,
        }
    }

    #[test]
    fn test_options_from_paths() {
        let opts = ReshapeOptions::from_paths(&DataPaths::new("/data"));
        assert_eq!(opts.input, PathBuf::from("/data/world_bank_energy_extract.csv"));
        assert_eq!(opts.output, PathBuf::from("/data/energy_data_multi_year.csv"));
        assert!(opts.summary.is_none());
    }

    #[test]
    fn test_reshape_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());

        let summary = reshape_file(&opts).unwrap();

        let written = fs::read_to_string(&opts.output).unwrap();
        assert_eq!(
            written,
            "Country Name,Country Code,Year,Electric Power Consumption (kWh per capita),\
Energy Use (kg oil equivalent per capita),Greenhouse Gas Emissions (Mt CO2e)\r\n\
Testland,TST,2021,110.0,50.0,2.5\r\n"
        );
        assert_eq!(summary.output_rows, 1);
        assert_eq!(summary.country_groups, 2);
        assert_eq!(summary.countries_with_all_metrics, 1);
        assert_eq!(summary.input_years, Some((2020, 2021)));
        assert_eq!(summary.output_years, Some((2021, 2021)));
        assert_eq!(summary.rows_per_year.get(&2021), Some(&1));
    }

    #[test]
    fn test_reshape_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());

        reshape_file(&opts).unwrap();
        let first = fs::read(&opts.output).unwrap();
        reshape_file(&opts).unwrap();
        let second = fs::read(&opts.output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_result_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("long.csv");
        fs::write(
            &input,
            "Country Name,Country Code,Series Name,2020 [YR2020]\nPartial,PRT,Energy use (kg of oil equivalent per capita),1\n",
        )
        .unwrap();
        let opts = ReshapeOptions {
            input,
            output: dir.path().join("wide.csv"),
            summary: None,
        };

        let summary = reshape_file(&opts).unwrap();

        assert_eq!(summary.output_rows, 0);
        assert_eq!(summary.output_years, None);
        let written = fs::read_to_string(&opts.output).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.starts_with("Country Name,Country Code,Year,"));
    }

    #[test]
    fn test_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.summary = Some(dir.path().join("summary.json"));

        reshape_file(&opts).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap()).unwrap();
        assert_eq!(json["output_rows"], 1);
        assert_eq!(json["skipped_missing"], 1);
        assert_eq!(json["sample"][0]["Country Name"], "Testland");
        assert_eq!(json["rows_per_year"]["2021"], 1);
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ReshapeOptions {
            input: dir.path().join("absent.csv"),
            output: dir.path().join("wide.csv"),
            summary: None,
        };

        let err = reshape_file(&opts).unwrap_err();
        assert!(matches!(err, PipelineError::Csv(CsvError::Read { .. })));
        assert!(!opts.output.exists());
    }
}

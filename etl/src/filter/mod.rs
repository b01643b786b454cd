//! Restrict a wide dataset to countries with known centroids.
//!
//! Rows are kept when their `Country Name` appears in the `COUNTRY` column
//! of the centroid file. The header and the order of kept rows are
//! preserved.

use csv::StringRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::config::DataPaths;
use crate::error::{CsvResult, FilterError, FilterResult, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{CENTROID_COUNTRY, COUNTRY_NAME, YEAR};
use crate::parser::{read_table, write_table, Table};

/// Matched countries listed in the report.
pub const SAMPLE_COUNTRIES: usize = 10;

/// Options for the centroid filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// Wide dataset to filter
    pub input: PathBuf,
    /// Centroid file with a `COUNTRY` column
    pub centroids: PathBuf,
    /// Filtered dataset to write
    pub output: PathBuf,
}

impl FilterOptions {
    pub fn from_paths(paths: &DataPaths) -> Self {
        Self {
            input: paths.multi_year(),
            centroids: paths.centroids(),
            output: paths.multi_year_filtered(),
        }
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::from_paths(&DataPaths::default())
    }
}

/// Everything the filter report prints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub centroid_countries: usize,
    pub input_rows: usize,
    pub countries_in_input: usize,
    /// Matched countries, sorted
    pub matched: Vec<String>,
    /// Countries without a centroid, sorted
    pub excluded: Vec<String>,
    pub rows_kept: usize,
    pub rows_per_year: BTreeMap<i32, usize>,
}

/// Rows kept by [`filter_table`] plus the report figures.
#[derive(Debug)]
pub struct FilterOutcome<'a> {
    pub rows: Vec<&'a StringRecord>,
    pub summary: FilterSummary,
}

/// Load the set of country names from a centroid file.
pub fn load_centroid_countries<P: AsRef<Path>>(path: P) -> CsvResult<HashSet<String>> {
    let table = read_table(path)?;
    let idx = table.require_column(CENTROID_COUNTRY)?;

    Ok(table
        .rows
        .iter()
        .map(|row| row.get(idx).unwrap_or("").to_string())
        .collect())
}

/// Keep the rows of `table` whose country is in `centroids`.
pub fn filter_table<'a>(table: &'a Table, centroids: &HashSet<String>) -> FilterResult<FilterOutcome<'a>> {
    let country_idx = table.require_column(COUNTRY_NAME)?;

    let mut rows = Vec::new();
    let mut seen = BTreeSet::new();
    let mut matched = BTreeSet::new();
    let mut excluded = BTreeSet::new();

    for row in &table.rows {
        let name = row.get(country_idx).unwrap_or("");
        seen.insert(name);
        if centroids.contains(name) {
            rows.push(row);
            matched.insert(name);
        } else {
            excluded.insert(name);
        }
    }

    let rows_per_year = count_years(table, &rows)?;

    let summary = FilterSummary {
        centroid_countries: centroids.len(),
        input_rows: table.len(),
        countries_in_input: seen.len(),
        matched: matched.into_iter().map(String::from).collect(),
        excluded: excluded.into_iter().map(String::from).collect(),
        rows_kept: rows.len(),
        rows_per_year,
    };

    Ok(FilterOutcome { rows, summary })
}

fn count_years(table: &Table, rows: &[&StringRecord]) -> FilterResult<BTreeMap<i32, usize>> {
    let mut counts = BTreeMap::new();
    if rows.is_empty() {
        return Ok(counts);
    }

    let year_idx = table.require_column(YEAR)?;
    for row in rows {
        let raw = row.get(year_idx).unwrap_or("");
        let year = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| FilterError::InvalidYear { value: raw.to_string() })?;
        *counts.entry(year).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Filter the input file into the output file.
pub fn filter_file(options: &FilterOptions) -> PipelineResult<FilterSummary> {
    log_info(format!("Loading countries from {}...", options.centroids.display()));
    let centroids = load_centroid_countries(&options.centroids)?;
    log_success(format!("Found {} countries with coordinates", centroids.len()));

    log_info(format!("📖 Reading energy data from {}...", options.input.display()));
    let table = read_table(&options.input)?;
    log_success(format!("Total rows in energy data: {}", table.len()));

    let outcome = filter_table(&table, &centroids)?;
    write_table(&options.output, &table.headers, &outcome.rows)?;

    print_summary(&outcome.summary, &options.output);
    Ok(outcome.summary)
}

fn print_summary(summary: &FilterSummary, output: &Path) {
    log_info("=== FILTERING RESULTS ===");
    log_info_indent(format!("Countries in energy data: {}", summary.countries_in_input), 1);
    log_info_indent(format!("Countries matched with centroids: {}", summary.matched.len()), 1);
    log_info_indent(format!("Countries excluded (no centroids): {}", summary.excluded.len()), 1);
    log_info_indent(format!("Rows after filtering: {}", summary.rows_kept), 1);
    log_success(format!("💾 Saved to: {}", output.display()));

    if !summary.excluded.is_empty() {
        log_warning("=== EXCLUDED COUNTRIES (no centroids) ===");
        for country in &summary.excluded {
            log_info_indent(format!("- {}", country), 1);
        }
    }

    log_info("=== YEAR DISTRIBUTION ===");
    for (year, count) in &summary.rows_per_year {
        log_info_indent(format!("{}: {} countries", year, count), 1);
    }

    log_info("=== SAMPLE MATCHED COUNTRIES ===");
    for country in summary.matched.iter().take(SAMPLE_COUNTRIES) {
        log_info_indent(format!("✓ {}", country), 1);
    }
    if summary.matched.len() > SAMPLE_COUNTRIES {
        log_info_indent(format!("... and {} more", summary.matched.len() - SAMPLE_COUNTRIES), 1);
    }
}

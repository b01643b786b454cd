//! Compare the country sets of two wide datasets.
//!
//! Typically used to check the filtered multi-year dataset against an
//! earlier single-year dataset: the candidate is restricted to one year and
//! both country sets are diffed.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::DataPaths;
use crate::error::{CsvResult, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{COUNTRY_NAME, YEAR};
use crate::parser::{read_table, Table};
use crate::validation::has_columns;

/// Year the candidate is restricted to by default.
pub const DEFAULT_YEAR: i32 = 2020;

/// Options for the comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    /// Reference dataset, taken whole
    pub reference: PathBuf,
    /// Candidate dataset
    pub candidate: PathBuf,
    /// Only candidate rows whose `Year` equals this
    pub year: Option<i32>,
}

impl CompareOptions {
    pub fn from_paths(paths: &DataPaths) -> Self {
        Self {
            reference: paths.reference_2020(),
            candidate: paths.multi_year_filtered(),
            year: Some(DEFAULT_YEAR),
        }
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self::from_paths(&DataPaths::default())
    }
}

/// Set differences between two country sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareReport {
    pub reference_count: usize,
    pub candidate_count: usize,
    /// Sorted
    pub only_in_reference: Vec<String>,
    /// Sorted
    pub only_in_candidate: Vec<String>,
    pub common: usize,
}

impl CompareReport {
    pub fn is_identical(&self) -> bool {
        self.only_in_reference.is_empty() && self.only_in_candidate.is_empty()
    }
}

/// Country names of a table, optionally only from rows of one year.
///
/// The year is compared as text against the `Year` cell; a table without a
/// `Year` column has no rows for any year.
pub fn countries_in_table(table: &Table, year: Option<i32>) -> CsvResult<BTreeSet<String>> {
    let country_idx = table.require_column(COUNTRY_NAME)?;

    let year_filter = match year {
        None => None,
        Some(_) if !has_columns(table, &[YEAR]) => return Ok(BTreeSet::new()),
        Some(y) => Some((table.require_column(YEAR)?, y.to_string())),
    };

    Ok(table
        .rows
        .iter()
        .filter(|row| match &year_filter {
            Some((idx, wanted)) => row.get(*idx) == Some(wanted.as_str()),
            None => true,
        })
        .map(|row| row.get(country_idx).unwrap_or("").to_string())
        .collect())
}

/// Load the country names of a CSV file.
pub fn countries_in_file<P: AsRef<Path>>(path: P, year: Option<i32>) -> CsvResult<BTreeSet<String>> {
    let table = read_table(path)?;
    countries_in_table(&table, year)
}

/// Diff two country sets.
pub fn compare_sets(reference: &BTreeSet<String>, candidate: &BTreeSet<String>) -> CompareReport {
    CompareReport {
        reference_count: reference.len(),
        candidate_count: candidate.len(),
        only_in_reference: reference.difference(candidate).cloned().collect(),
        only_in_candidate: candidate.difference(reference).cloned().collect(),
        common: reference.intersection(candidate).count(),
    }
}

/// Compare the reference and candidate files and print the differences.
pub fn compare_files(options: &CompareOptions) -> PipelineResult<CompareReport> {
    let reference = countries_in_file(&options.reference, None)?;
    let candidate = countries_in_file(&options.candidate, options.year)?;
    let report = compare_sets(&reference, &candidate);

    print_report(&report, options.year);
    Ok(report)
}

fn print_report(report: &CompareReport, year: Option<i32>) {
    let label = year.map(|y| format!(" {}", y)).unwrap_or_default();
    log_info(format!("Countries in reference dataset: {}", report.reference_count));
    log_info(format!("Countries in candidate{} dataset: {}", label, report.candidate_count));

    if !report.only_in_reference.is_empty() {
        log_warning(format!(
            "=== Countries in REFERENCE but NOT in CANDIDATE ({}) ===",
            report.only_in_reference.len()
        ));
        for country in &report.only_in_reference {
            log_info_indent(format!("- {}", country), 1);
        }
    }

    if !report.only_in_candidate.is_empty() {
        log_warning(format!(
            "=== Countries in CANDIDATE but NOT in REFERENCE ({}) ===",
            report.only_in_candidate.len()
        ));
        for country in &report.only_in_candidate {
            log_info_indent(format!("+ {}", country), 1);
        }
    }

    if report.is_identical() {
        log_success("Both datasets have exactly the same countries!");
    } else {
        log_info("=== SUMMARY ===");
        log_info_indent(format!("Common countries: {}", report.common), 1);
        log_info_indent(format!("Only in reference: {}", report.only_in_reference.len()), 1);
        log_info_indent(format!("Only in candidate: {}", report.only_in_candidate.len()), 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvError;
    use crate::parser::read_table_from_reader;
    use std::fs;

    fn table(csv: &str) -> Table {
        read_table_from_reader(csv.as_bytes(), Path::new("data.csv")).unwrap()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_year_filter() {
        let t = table("Country Name,Year\nAlbania,2020\nBrazil,2021\nChile,2020\n");

        assert_eq!(countries_in_table(&t, Some(2020)).unwrap(), set(&["Albania", "Chile"]));
        assert_eq!(countries_in_table(&t, None).unwrap(), set(&["Albania", "Brazil", "Chile"]));
    }

    #[test]
    fn test_year_filter_is_textual() {
        let t = table("Country Name,Year\nAlbania,2020.0\nBrazil, 2020\n");
        assert!(countries_in_table(&t, Some(2020)).unwrap().is_empty());
    }

    #[test]
    fn test_year_filter_without_year_column() {
        let t = table("Country Name\nAlbania\n");
        assert!(countries_in_table(&t, Some(2020)).unwrap().is_empty());
    }

    #[test]
    fn test_missing_country_column() {
        let t = table("Country,Year\nAlbania,2020\n");
        assert!(matches!(
            countries_in_table(&t, None),
            Err(CsvError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_set_differences() {
        let report = compare_sets(&set(&["A", "B", "C"]), &set(&["B", "C", "D", "E"]));

        assert_eq!(report.reference_count, 3);
        assert_eq!(report.candidate_count, 4);
        assert_eq!(report.only_in_reference, vec!["A"]);
        assert_eq!(report.only_in_candidate, vec!["D", "E"]);
        assert_eq!(report.common, 2);
        assert!(!report.is_identical());
    }

    #[test]
    fn test_identical_sets() {
        let report = compare_sets(&set(&["A"]), &set(&["A"]));
        assert!(report.is_identical());
        assert_eq!(report.common, 1);
    }

    #[test]
    fn test_compare_files() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.csv");
        let candidate = dir.path().join("candidate.csv");
        fs::write(&reference, "Country Name,Country Code\nAlbania,ALB\nBrazil,BRA\n").unwrap();
        fs::write(
            &candidate,
            "Country Name,Country Code,Year\nAlbania,ALB,2020\nBrazil,BRA,2019\nChile,CHL,2020\n",
        )
        .unwrap();

        let report = compare_files(&CompareOptions {
            reference,
            candidate,
            year: Some(2020),
        })
        .unwrap();

        assert_eq!(report.only_in_reference, vec!["Brazil"]);
        assert_eq!(report.only_in_candidate, vec!["Chile"]);
    }
}

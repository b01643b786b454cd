//! Long-to-wide reshaping.
//!
//! Each country arrives as several rows (one per series) with one column per
//! year. The reshape emits one [`WideRecord`] per (country, year) for which
//! all three metrics hold a number.
//!
//! # Skipping rules
//!
//! - A country missing any of the three metric rows produces nothing.
//! - A year where any metric cell is `..` is skipped.
//! - Otherwise a year where any metric cell is not a number is skipped.
//!
//! Skipped pairs are never errors; they only show up in [`ReshapeStats`].

use serde::Serialize;

use super::grouper::{group_by_country, select_metric_rows};
use super::years::detect_year_columns;
use crate::error::ReshapeResult;
use crate::models::{WideRecord, YearColumn, COUNTRY_CODE, COUNTRY_NAME, SERIES_NAME};
use crate::parser::Table;
use crate::validation::{classify_cell, require_columns, MetricCell};

/// Counters gathered while reshaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReshapeStats {
    /// Distinct country names in the input
    pub country_groups: usize,
    /// Countries with all three metric rows
    pub complete_countries: usize,
    /// Countries with at least one emitted row
    pub countries_with_data: usize,
    /// Pairs skipped because a cell held `..`
    pub skipped_missing: usize,
    /// Pairs skipped because a cell was not a number
    pub skipped_non_numeric: usize,
}

/// Result of reshaping a table.
#[derive(Debug, Clone)]
pub struct ReshapeOutcome {
    /// Year columns of the input, in header order
    pub year_columns: Vec<YearColumn>,
    /// Output rows: countries sorted by name, years in column order
    pub records: Vec<WideRecord>,
    pub stats: ReshapeStats,
}

/// Reshape a long-format table.
///
/// Fails only on structural problems: a missing `Country Name`,
/// `Country Code` or `Series Name` column, or no usable year column.
pub fn reshape_table(table: &Table) -> ReshapeResult<ReshapeOutcome> {
    let idx = require_columns(table, &[COUNTRY_NAME, COUNTRY_CODE, SERIES_NAME])?;
    let (country_idx, code_idx, series_idx) = (idx[0], idx[1], idx[2]);
    let year_columns = detect_year_columns(&table.headers)?;

    let groups = group_by_country(&table.rows, country_idx);
    let mut stats = ReshapeStats {
        country_groups: groups.len(),
        ..ReshapeStats::default()
    };
    let mut records = Vec::new();

    for (country, rows) in &groups {
        let Some(metrics) = select_metric_rows(rows, series_idx, code_idx) else {
            continue;
        };
        stats.complete_countries += 1;

        let before = records.len();
        for (column, year_column) in &year_columns {
            let cells = metrics.cells(*column).map(classify_cell);

            if cells.contains(&MetricCell::Missing) {
                stats.skipped_missing += 1;
                continue;
            }
            let [Some(power), Some(energy), Some(ghg)] = cells.map(|c| c.value()) else {
                stats.skipped_non_numeric += 1;
                continue;
            };

            records.push(WideRecord {
                country_name: country.to_string(),
                country_code: metrics.country_code.clone(),
                year: year_column.year,
                electric_power: power,
                energy_use: energy,
                greenhouse_gas: ghg,
            });
        }

        if records.len() > before {
            stats.countries_with_data += 1;
        }
    }

    Ok(ReshapeOutcome {
        year_columns: year_columns.into_iter().map(|(_, c)| c).collect(),
        records,
        stats,
    })
}

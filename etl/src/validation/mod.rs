//! Input checks.
//!
//! Two kinds of checks exist and they fail differently:
//!
//! - Structural: a required column is absent. This is fatal and surfaces as
//!   [`CsvError::MissingColumn`].
//! - Cell quality: a metric cell holds the `..` marker or is not a number.
//!   This is never an error; [`classify_cell`] reports it and the caller skips
//!   the affected (country, year) pair.
//!
//! # Example
//!
//! ```rust
//! use energy_etl::validation::{classify_cell, MetricCell};
//!
//! assert_eq!(classify_cell(Some("100.5")), MetricCell::Value(100.5));
//! assert_eq!(classify_cell(Some("..")), MetricCell::Missing);
//! assert_eq!(classify_cell(Some("n/a")), MetricCell::NonNumeric);
//! assert_eq!(classify_cell(None), MetricCell::NonNumeric);
//! ```

use serde::Serialize;

use crate::error::CsvResult;
use crate::models::MISSING_VALUE;
use crate::parser::Table;

/// Outcome of reading one metric cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MetricCell {
    /// A parsed number
    Value(f64),
    /// The `..` marker
    Missing,
    /// Anything else, including a cell absent from a short row
    NonNumeric,
}

impl MetricCell {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Classify a metric cell.
///
/// The marker is compared exactly; numbers may carry surrounding whitespace.
/// Digit separators (`1_000`) are not accepted.
pub fn classify_cell(cell: Option<&str>) -> MetricCell {
    match cell {
        Some(MISSING_VALUE) => MetricCell::Missing,
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(MetricCell::Value)
            .unwrap_or(MetricCell::NonNumeric),
        None => MetricCell::NonNumeric,
    }
}

/// Resolve every required column, failing on the first absent one.
pub fn require_columns(table: &Table, columns: &[&str]) -> CsvResult<Vec<usize>> {
    columns
        .iter()
        .map(|c| table.require_column(c))
        .collect()
}

/// Check whether a table carries all the given columns.
pub fn has_columns(table: &Table, columns: &[&str]) -> bool {
    columns.iter().all(|c| table.column_index(c).is_some())
}

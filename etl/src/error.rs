//! Error types for the energy ETL pipeline.
//!
//! - [`CsvError`] - Reading and writing CSV tables
//! - [`ReshapeError`] - Long-to-wide reshaping
//! - [`FilterError`] - Centroid filtering
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while loading or writing a CSV table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to open or read a file.
    #[error("Cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write a file.
    #[error("Cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content, or a failure inside the CSV reader/writer.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the operation depends on is absent from the header.
    #[error("Missing column '{column}' in '{}'", .path.display())]
    MissingColumn { column: String, path: PathBuf },
}

// =============================================================================
// Reshape Errors
// =============================================================================

/// Errors during the long-to-wide reshape.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// Input table could not be read or written.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// The header contains no `<YYYY> [YR<YYYY>]` columns.
    #[error("No year columns found in header")]
    NoYearColumns,

    /// A header looks like a year column but its leading token is not a year.
    #[error("Cannot derive a year from column '{0}'")]
    InvalidYearColumn(String),
}

// =============================================================================
// Filter Errors
// =============================================================================

/// Errors during centroid filtering.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// A kept row has a `Year` cell that is not an integer.
    #[error("Invalid year value '{value}'")]
    InvalidYear { value: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by every entry point in
/// [`crate::transform::pipeline`], [`crate::filter`] and [`crate::compare`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Reshape error.
    #[error("Reshape error: {0}")]
    Reshape(#[from] ReshapeError),

    /// Filter error.
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Summary serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for reshape operations.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> ReshapeError -> PipelineError
        let csv_err = CsvError::MissingColumn {
            column: "Series Name".into(),
            path: PathBuf::from("input.csv"),
        };
        let reshape_err: ReshapeError = csv_err.into();
        let pipeline_err: PipelineError = reshape_err.into();
        let msg = pipeline_err.to_string();
        assert!(msg.contains("Series Name"));
        assert!(msg.contains("input.csv"));
    }

    #[test]
    fn test_read_error_keeps_source() {
        let err = CsvError::Read {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("missing.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_year_format() {
        let err = FilterError::InvalidYear { value: "20x1".into() };
        assert!(err.to_string().contains("20x1"));
    }
}

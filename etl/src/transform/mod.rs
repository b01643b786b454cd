//! Long-to-wide transformation.
//!
//! - Years: year column detection
//! - Grouper: rows by country, metric row selection
//! - Reshape: the long-to-wide algorithm
//! - Pipeline: file in, file out, report

pub mod grouper;
pub mod pipeline;
pub mod reshape;
pub mod years;

pub use grouper::{group_by_country, select_metric_rows, MetricRows};
pub use pipeline::{reshape_file, write_wide_csv, ReshapeOptions, ReshapeSummary};
pub use reshape::{reshape_table, ReshapeOutcome, ReshapeStats};
pub use years::{detect_year_columns, is_year_column, parse_year_column, year_range};

//! # energy-etl - World Bank energy indicator reshaping
//!
//! Turns World Bank "Data" extracts (one row per country and series, one
//! column per year) into a wide dataset with one row per country and year,
//! then narrows and checks that dataset.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Long CSV   │────▶│   Parser    │────▶│   Reshape   │────▶│  Wide CSV   │
//! │ (WB extract)│     │  (in-mem)   │     │ (by country)│     │ (per year)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                               ┌─────────────┐     ┌─────────────┐  │
//!                               │   Compare   │◀────│   Filter    │◀─┘
//!                               │ (set diff)  │     │ (centroids) │
//!                               └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use energy_etl::{reshape_file, ReshapeOptions};
//!
//! let summary = reshape_file(&ReshapeOptions::default())?;
//! println!("Wrote {} rows", summary.output_rows);
//! # Ok::<(), energy_etl::PipelineError>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error hierarchy
//! - [`config`] - Data file locations
//! - [`logs`] - Report logging
//! - [`models`] - Metrics, year columns, wide records
//! - [`parser`] - CSV loading and writing
//! - [`validation`] - Required columns and metric cells
//! - [`transform`] - Year detection, grouping, reshape, pipeline
//! - [`filter`] - Centroid filter
//! - [`compare`] - Country set comparison

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Follow-up steps on the wide dataset
pub mod compare;
pub mod filter;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CsvError, FilterError, PipelineError, PipelineResult, ReshapeError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{format_float, Metric, WideRecord, YearColumn, MISSING_VALUE, OUTPUT_HEADERS};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::DataPaths;

// =============================================================================
// Re-exports - Parsing & Validation
// =============================================================================

pub use parser::{read_table, Table};
pub use validation::{classify_cell, MetricCell};

// =============================================================================
// Re-exports - Pipelines
// =============================================================================

pub use transform::{reshape_file, reshape_table, ReshapeOptions, ReshapeOutcome, ReshapeSummary};
pub use filter::{filter_file, FilterOptions, FilterSummary};
pub use compare::{compare_files, CompareOptions, CompareReport};

//! Year column detection.
//!
//! World Bank extracts name their year columns `2005 [YR2005]`. A header is
//! a year column when it starts with `20` and carries a `[YR` tag; its year
//! is the first whitespace-separated token, which must be an integer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ReshapeError, ReshapeResult};
use crate::models::YearColumn;

static YEAR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:\s|$)").expect("year token pattern is valid"));

/// Whether a header names a year column.
pub fn is_year_column(header: &str) -> bool {
    header.starts_with("20") && header.contains("[YR")
}

/// Derive the year of a year column header.
pub fn parse_year_column(header: &str) -> ReshapeResult<YearColumn> {
    let year = YEAR_TOKEN
        .captures(header)
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .ok_or_else(|| ReshapeError::InvalidYearColumn(header.to_string()))?;

    Ok(YearColumn {
        header: header.to_string(),
        year,
    })
}

/// All year columns of a header, in header order, with their positions.
pub fn detect_year_columns(headers: &[String]) -> ReshapeResult<Vec<(usize, YearColumn)>> {
    let columns = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| is_year_column(h))
        .map(|(i, h)| parse_year_column(h).map(|c| (i, c)))
        .collect::<ReshapeResult<Vec<_>>>()?;

    if columns.is_empty() {
        return Err(ReshapeError::NoYearColumns);
    }

    Ok(columns)
}

/// Smallest and largest year, if any.
pub fn year_range<I: IntoIterator<Item = i32>>(years: I) -> Option<(i32, i32)> {
    years.into_iter().fold(None, |range, y| match range {
        None => Some((y, y)),
        Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
    })
}

//! Domain models for the energy ETL pipeline.
//!
//! - [`Metric`] - The three World Bank series the reshaper extracts
//! - [`YearColumn`] - A `<YYYY> [YR<YYYY>]` header and its year
//! - [`WideRecord`] - One (country, year) output row
//!
//! Output floats are rendered by [`format_float`] so that reshaped files are
//! byte-compatible with the datasets already in circulation.

use serde::{Serialize, Serializer};

// =============================================================================
// Column Names
// =============================================================================

pub const COUNTRY_NAME: &str = "Country Name";
pub const COUNTRY_CODE: &str = "Country Code";
pub const SERIES_NAME: &str = "Series Name";
pub const YEAR: &str = "Year";
/// Country column of the centroid file.
pub const CENTROID_COUNTRY: &str = "COUNTRY";

/// Marker used by World Bank extracts for "no data".
pub const MISSING_VALUE: &str = "..";

/// Header of the reshaped wide file, in write order.
pub const OUTPUT_HEADERS: [&str; 6] = [
    COUNTRY_NAME,
    COUNTRY_CODE,
    YEAR,
    "Electric Power Consumption (kWh per capita)",
    "Energy Use (kg oil equivalent per capita)",
    "Greenhouse Gas Emissions (Mt CO2e)",
];

// =============================================================================
// Metrics
// =============================================================================

/// A series the reshaper turns into an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    ElectricPower,
    EnergyUse,
    GreenhouseGas,
}

impl Metric {
    /// All metrics in output column order.
    pub const ALL: [Metric; 3] = [Metric::ElectricPower, Metric::EnergyUse, Metric::GreenhouseGas];

    /// Exact `Series Name` used by the World Bank extract.
    pub fn source_label(&self) -> &'static str {
        match self {
            Self::ElectricPower => "Electric power consumption (kWh per capita)",
            Self::EnergyUse => "Energy use (kg of oil equivalent per capita)",
            Self::GreenhouseGas => "Total greenhouse gas emissions including LULUCF (Mt CO2e)",
        }
    }

    /// Match a `Series Name` cell exactly.
    pub fn from_source_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.source_label() == label)
    }
}

// =============================================================================
// Year Columns
// =============================================================================

/// A year-valued column of the long input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearColumn {
    /// Header text, e.g. `2005 [YR2005]`
    pub header: String,
    /// Year taken from the first whitespace-separated token
    pub year: i32,
}

// =============================================================================
// Wide Records
// =============================================================================

/// One row of the reshaped output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideRecord {
    #[serde(rename = "Country Name")]
    pub country_name: String,
    #[serde(rename = "Country Code")]
    pub country_code: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Electric Power Consumption (kWh per capita)", serialize_with = "serialize_float")]
    pub electric_power: f64,
    #[serde(rename = "Energy Use (kg oil equivalent per capita)", serialize_with = "serialize_float")]
    pub energy_use: f64,
    #[serde(rename = "Greenhouse Gas Emissions (Mt CO2e)", serialize_with = "serialize_float")]
    pub greenhouse_gas: f64,
}

fn serialize_float<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_float(*value))
}

/// Shortest round-trip rendering of a float.
///
/// Integral values keep a trailing `.0`, and values outside `[1e-4, 1e16)`
/// use an exponent with an explicit sign and at least two digits
/// (`1e-05`, `1.5e+16`). Non-finite values are `nan`, `inf` and `-inf`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_labels_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_source_label(metric.source_label()), Some(metric));
        }
        assert_eq!(Metric::from_source_label("Population, total"), None);
    }

    #[test]
    fn test_metric_label_is_exact() {
        assert_eq!(
            Metric::from_source_label("electric power consumption (kWh per capita)"),
            None
        );
        assert_eq!(
            Metric::from_source_label(" Electric power consumption (kWh per capita)"),
            None
        );
    }

    #[test]
    fn test_format_float_keeps_fraction() {
        assert_eq!(format_float(110.0), "110.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-3.25), "-3.25");
        assert_eq!(format_float(5237.37318524488), "5237.37318524488");
    }

    #[test]
    fn test_format_float_exponent() {
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e16), "1.5e+16");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(1.25e-7), "1.25e-07");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_format_float_non_finite() {
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }
}

//! Group long-format rows by country and pick out the metric rows.
//!
//! ```text
//! Long input (3 rows per country)              →  Metric rows per country
//! ┌──────────────────────────────────────────┐    ┌──────────────────────────┐
//! │ Testland, TST, Electric power ..., ...   │    │ Testland (TST)           │
//! │ Testland, TST, Energy use ..., ...       │ →  │   ElectricPower → row    │
//! │ Testland, TST, Total greenhouse ..., ... │    │   EnergyUse     → row    │
//! │ Testland, TST, Population, total, ...    │    │   GreenhouseGas → row    │
//! └──────────────────────────────────────────┘    └──────────────────────────┘
//! ```

use csv::StringRecord;
use std::collections::BTreeMap;

use crate::models::Metric;

/// Rows of one country, keyed by country name in sorted order.
pub type CountryGroups<'a> = BTreeMap<&'a str, Vec<&'a StringRecord>>;

/// Partition rows by their country name cell.
///
/// A row without that cell groups under the empty name.
pub fn group_by_country(rows: &[StringRecord], country_idx: usize) -> CountryGroups<'_> {
    let mut groups: CountryGroups<'_> = BTreeMap::new();
    for row in rows {
        let name = row.get(country_idx).unwrap_or("");
        groups.entry(name).or_default().push(row);
    }
    groups
}

/// The three metric rows of a country.
#[derive(Debug, Clone)]
pub struct MetricRows<'a> {
    /// Country code of the first metric row encountered
    pub country_code: String,
    rows: [&'a StringRecord; 3],
}

impl<'a> MetricRows<'a> {
    /// Row holding the series of `metric`.
    pub fn row(&self, metric: Metric) -> &'a StringRecord {
        match metric {
            Metric::ElectricPower => self.rows[0],
            Metric::EnergyUse => self.rows[1],
            Metric::GreenhouseGas => self.rows[2],
        }
    }

    /// Cell of each metric row at `column`, in [`Metric::ALL`] order.
    pub fn cells(&self, column: usize) -> [Option<&'a str>; 3] {
        Metric::ALL.map(|m| self.row(m).get(column))
    }
}

/// Select the metric rows of one country.
///
/// Returns `None` unless all three metrics are present. When a series
/// appears twice the later row wins.
pub fn select_metric_rows<'a>(
    rows: &[&'a StringRecord],
    series_idx: usize,
    code_idx: usize,
) -> Option<MetricRows<'a>> {
    let mut found: BTreeMap<Metric, &'a StringRecord> = BTreeMap::new();
    let mut country_code: Option<String> = None;

    for &row in rows {
        let Some(metric) = row.get(series_idx).and_then(Metric::from_source_label) else {
            continue;
        };
        found.insert(metric, row);
        if country_code.is_none() {
            country_code = Some(row.get(code_idx).unwrap_or("").to_string());
        }
    }

    let power = *found.get(&Metric::ElectricPower)?;
    let energy = *found.get(&Metric::EnergyUse)?;
    let ghg = *found.get(&Metric::GreenhouseGas)?;

    Some(MetricRows {
        country_code: country_code.unwrap_or_default(),
        rows: [power, energy, ghg],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    const POWER: &str = "Electric power consumption (kWh per capita)";
    const ENERGY: &str = "Energy use (kg of oil equivalent per capita)";
    const GHG: &str = "Total greenhouse gas emissions including LULUCF (Mt CO2e)";

    #[test]
    fn test_groups_sorted_by_name() {
        let rows = vec![
            record(&["Zambia", "ZMB", POWER]),
            record(&["Albania", "ALB", POWER]),
            record(&["Zambia", "ZMB", ENERGY]),
        ];
        let groups = group_by_country(&rows, 0);

        let names: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(names, vec!["Albania", "Zambia"]);
        assert_eq!(groups["Zambia"].len(), 2);
    }

    #[test]
    fn test_complete_country() {
        let rows = vec![
            record(&["Testland", "TST", "Population, total", "1"]),
            record(&["Testland", "TST", GHG, "2.5"]),
            record(&["Testland", "TST", POWER, "110.0"]),
            record(&["Testland", "TST", ENERGY, "50.0"]),
        ];
        let refs: Vec<&StringRecord> = rows.iter().collect();
        let metrics = select_metric_rows(&refs, 2, 1).unwrap();

        assert_eq!(metrics.country_code, "TST");
        assert_eq!(metrics.cells(3), [Some("110.0"), Some("50.0"), Some("2.5")]);
    }

    #[test]
    fn test_partial_country_rejected() {
        let rows = vec![
            record(&["Partial", "PRT", POWER, "1"]),
            record(&["Partial", "PRT", ENERGY, "2"]),
        ];
        let refs: Vec<&StringRecord> = rows.iter().collect();
        assert!(select_metric_rows(&refs, 2, 1).is_none());
    }

    #[test]
    fn test_duplicate_series_last_wins_code_first() {
        let rows = vec![
            record(&["Dupe", "AAA", POWER, "1"]),
            record(&["Dupe", "BBB", POWER, "9"]),
            record(&["Dupe", "BBB", ENERGY, "2"]),
            record(&["Dupe", "BBB", GHG, "3"]),
        ];
        let refs: Vec<&StringRecord> = rows.iter().collect();
        let metrics = select_metric_rows(&refs, 2, 1).unwrap();

        assert_eq!(metrics.country_code, "AAA");
        assert_eq!(metrics.row(Metric::ElectricPower).get(3), Some("9"));
    }

    #[test]
    fn test_short_footer_rows_ignored() {
        let rows = vec![record(&["Data from database: World Development Indicators"])];
        let refs: Vec<&StringRecord> = rows.iter().collect();
        assert!(select_metric_rows(&refs, 2, 1).is_none());
    }
}

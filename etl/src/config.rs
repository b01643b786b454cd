//! Data file locations.
//!
//! Every command works on fixed file names inside one data directory.
//! The directory defaults to the current directory and can be set with
//! `ENERGY_ETL_DATA_DIR` (a `.env` file is honoured).

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "ENERGY_ETL_DATA_DIR";

/// World Bank "Data" extract in long format.
pub const WORLD_BANK_EXTRACT: &str = "world_bank_energy_extract.csv";
/// Reshaped wide output.
pub const MULTI_YEAR: &str = "energy_data_multi_year.csv";
/// Wide output restricted to countries with centroids.
pub const MULTI_YEAR_FILTERED: &str = "energy_data_multi_year_filtered.csv";
/// Country centroid coordinates.
pub const CENTROIDS: &str = "country_centroids.csv";
/// Earlier single-year dataset used as comparison reference.
pub const REFERENCE_2020: &str = "energy_data_reorganized_2020_complete_only.csv";

/// Resolves the well-known data files against a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    dir: PathBuf,
}

impl DataPaths {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Read the data directory from `ENERGY_ETL_DATA_DIR`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        match env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir.trim()),
            _ => Self::new("."),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn world_bank_extract(&self) -> PathBuf {
        self.dir.join(WORLD_BANK_EXTRACT)
    }

    pub fn multi_year(&self) -> PathBuf {
        self.dir.join(MULTI_YEAR)
    }

    pub fn multi_year_filtered(&self) -> PathBuf {
        self.dir.join(MULTI_YEAR_FILTERED)
    }

    pub fn centroids(&self) -> PathBuf {
        self.dir.join(CENTROIDS)
    }

    pub fn reference_2020(&self) -> PathBuf {
        self.dir.join(REFERENCE_2020)
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_join_directory() {
        let paths = DataPaths::new("/data/energy");
        assert_eq!(
            paths.multi_year(),
            PathBuf::from("/data/energy/energy_data_multi_year.csv")
        );
        assert_eq!(
            paths.centroids(),
            PathBuf::from("/data/energy/country_centroids.csv")
        );
    }

    #[test]
    fn test_reshape_output_feeds_filter() {
        // The filter's default input is the reshaper's default output
        let paths = DataPaths::new("out");
        assert_eq!(paths.multi_year().file_name().unwrap(), MULTI_YEAR);
        assert_ne!(paths.multi_year(), paths.multi_year_filtered());
    }
}

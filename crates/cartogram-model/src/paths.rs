//! File names derived from the dataset path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{ModelError, Result};

const DATA_CSV_SUFFIX: &str = "_data.csv";
const PROCESSED_CSV_SUFFIX: &str = "_data_processed.csv";
const PROCESSED_MAP_SUFFIX: &str = "_processedmap.json";

/// The intermediate files that sit beside a dataset.
///
/// With the dataset `maps/region.json` the base is `maps/region` and the
/// derived files are `maps/region_data.csv`, `maps/region_data_processed.csv`
/// and `maps/region_processedmap.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPaths {
    /// Region table written by the normalization pass.
    pub data_csv: PathBuf,
    /// Joined region table handed to the apply pass.
    pub processed_csv: PathBuf,
    /// Normalized map written by the normalization pass.
    pub processed_map: PathBuf,
}

impl DerivedPaths {
    pub fn from_dataset(dataset: &Path) -> Result<Self> {
        if dataset.file_name().is_none() {
            return Err(ModelError::InvalidDataset {
                path: dataset.to_path_buf(),
            });
        }
        let base = dataset.with_extension("");
        Ok(Self {
            data_csv: with_suffix(&base, DATA_CSV_SUFFIX),
            processed_csv: with_suffix(&base, PROCESSED_CSV_SUFFIX),
            processed_map: with_suffix(&base, PROCESSED_MAP_SUFFIX),
        })
    }

    /// All derived files, in housekeeping order.
    pub fn all(&self) -> [&Path; 3] {
        [&self.data_csv, &self.processed_csv, &self.processed_map]
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

//! CSV Data Loader Module
//! Loads the metadata and ratings CSV files using Polars.

use log::{error, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Loads the two source CSV files and holds them for the process lifetime.
pub struct DataLoader {
    metadata_path: PathBuf,
    ratings_path: PathBuf,
    metadata: Option<DataFrame>,
    ratings: Option<DataFrame>,
}

impl DataLoader {
    pub fn new(metadata_path: impl Into<PathBuf>, ratings_path: impl Into<PathBuf>) -> Self {
        Self {
            metadata_path: metadata_path.into(),
            ratings_path: ratings_path.into(),
            metadata: None,
            ratings: None,
        }
    }

    /// Load both datasets. Each file is read independently; a failed read
    /// leaves that table unloaded and is reported through the logger rather
    /// than aborting the run.
    pub fn load(&mut self) {
        match Self::read_csv(&self.metadata_path) {
            Ok(df) => {
                info!(
                    "Loaded metadata dataset from {} ({} rows)",
                    self.metadata_path.display(),
                    df.height()
                );
                self.metadata = Some(df);
            }
            Err(e) => error!(
                "Failed to load metadata dataset {}: {e}",
                self.metadata_path.display()
            ),
        }

        match Self::read_csv(&self.ratings_path) {
            Ok(df) => {
                info!(
                    "Loaded ratings dataset from {} ({} rows)",
                    self.ratings_path.display(),
                    df.height()
                );
                self.ratings = Some(df);
            }
            Err(e) => error!(
                "Failed to load ratings dataset {}: {e}",
                self.ratings_path.display()
            ),
        }

        if self.metadata.is_some() && self.ratings.is_some() {
            info!("Datasets loaded successfully.");
        }
    }

    /// Read a single CSV file using Polars.
    fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        // Lazy reader with schema inference; malformed rows fall back to
        // whatever the parser defaults to.
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Get the metadata table, if loaded.
    pub fn metadata(&self) -> Option<&DataFrame> {
        self.metadata.as_ref()
    }

    /// Get the ratings table, if loaded.
    pub fn ratings(&self) -> Option<&DataFrame> {
        self.ratings.as_ref()
    }

    /// Set both tables directly (used by tests to skip the filesystem).
    #[cfg(test)]
    pub(crate) fn set_tables(&mut self, metadata: DataFrame, ratings: DataFrame) {
        self.metadata = Some(metadata);
        self.ratings = Some(ratings);
    }
}

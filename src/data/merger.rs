//! Dataset Merger Module
//! Inner-joins the metadata and ratings tables on a normalized movie id.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Merges the two source tables into the combined dataset.
pub struct Merger;

impl Merger {
    /// Inner join of metadata and ratings on `id == movieId`.
    ///
    /// The keys are heterogeneous at the source (`id` arrives as text,
    /// `movieId` as a number), so both sides are cast to strings before
    /// joining. Rows without a textual match on both sides are dropped. The
    /// result carries the union of both schemas; `movieId` is re-added as a
    /// copy of the normalized key so the exported records keep both columns.
    pub fn merge(metadata: &DataFrame, ratings: &DataFrame) -> Result<DataFrame, MergeError> {
        let ratings = ratings
            .clone()
            .lazy()
            .with_column(col("movieId").cast(DataType::String));

        let merged = metadata
            .clone()
            .lazy()
            .with_column(col("id").cast(DataType::String))
            .join(
                ratings,
                [col("id")],
                [col("movieId")],
                JoinArgs::new(JoinType::Inner),
            )
            .with_column(col("id").alias("movieId"))
            .collect()?;

        Ok(merged)
    }
}

//! Statistics Calculator Module
//! Descriptive reports over the movie metadata and ratings tables.

use polars::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Number of entries in the top-rated listing.
pub const TOP_RATED_COUNT: usize = 5;

/// A movie title paired with its score from the ratings table.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedMovie {
    pub title: String,
    pub rating: f64,
}

/// Stateless report computations shared by the console pipeline.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count of distinct `title` strings (exact, case-sensitive equality).
    pub fn unique_title_count(metadata: &DataFrame) -> Result<usize, StatsError> {
        let unique = metadata.column("title")?.unique()?;
        // Nulls form their own entry in the unique set; drop them.
        Ok(unique.len() - unique.null_count())
    }

    /// Null-skipping arithmetic mean of the `rating` column. NaN when the
    /// column holds no values at all.
    pub fn average_rating(ratings: &DataFrame) -> Result<f64, StatsError> {
        let rating = ratings.column("rating")?.cast(&DataType::Float64)?;
        Ok(rating.f64()?.mean().unwrap_or(f64::NAN))
    }

    /// The `count` highest-rated movies.
    ///
    /// Ratings are sorted descending with ties kept in source order and the
    /// top ids normalized to text. Matching metadata rows are then selected
    /// by membership, so the output follows metadata row order rather than
    /// rank order. Each entry carries the score the id earned in the
    /// ratings table.
    pub fn top_rated(
        metadata: &DataFrame,
        ratings: &DataFrame,
        count: usize,
    ) -> Result<Vec<RatedMovie>, StatsError> {
        let top = ratings
            .clone()
            .lazy()
            .select([
                col("movieId").cast(DataType::String),
                col("rating").cast(DataType::Float64),
            ])
            .sort(
                ["rating"],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .limit(count as IdxSize)
            .collect()?;

        let ids = top.column("movieId")?.str()?;
        let scores = top.column("rating")?.f64()?;
        let mut score_by_id: HashMap<String, f64> = HashMap::with_capacity(top.height());
        for (id, score) in ids.into_iter().zip(scores) {
            if let (Some(id), Some(score)) = (id, score) {
                // An id can hold several of the top rows; the first one seen
                // is the highest score and the one that earned the slot.
                score_by_id.entry(id.to_string()).or_insert(score);
            }
        }

        let id_col = metadata.column("id")?.cast(&DataType::String)?;
        let title_col = metadata.column("title")?.cast(&DataType::String)?;
        let mut result = Vec::new();
        for (id, title) in id_col.str()?.into_iter().zip(title_col.str()?) {
            let (Some(id), Some(title)) = (id, title) else {
                continue;
            };
            if let Some(&rating) = score_by_id.get(id) {
                result.push(RatedMovie {
                    title: title.to_string(),
                    rating,
                });
            }
        }
        Ok(result)
    }

    /// Movies released per calendar year, ascending by year.
    ///
    /// Unparseable dates yield null and fall out of the tally. The derived
    /// year column lives only inside this computation; the metadata table is
    /// never mutated.
    pub fn releases_per_year(metadata: &DataFrame) -> Result<Vec<(i32, u32)>, StatsError> {
        let options = StrptimeOptions {
            format: Some("%Y-%m-%d".into()),
            strict: false,
            ..Default::default()
        };

        let counts = metadata
            .clone()
            .lazy()
            .select([col("release_date")
                .cast(DataType::String)
                .str()
                .to_date(options)
                .dt()
                .year()
                .alias("year")])
            .drop_nulls(None)
            .group_by([col("year")])
            .agg([len().alias("count")])
            .sort(["year"], SortMultipleOptions::default())
            .collect()?;

        let years = counts.column("year")?.i32()?;
        let tallies = counts.column("count")?.u32()?;
        Ok(years
            .into_iter()
            .zip(tallies)
            .filter_map(|(year, count)| Some((year?, count?)))
            .collect())
    }

    /// Occurrences per genre, descending by count (ties keep first
    /// appearance order).
    ///
    /// Each row's `genres` string splits on commas and every trimmed token
    /// counts once, so a movie with N genres contributes N occurrences.
    /// Rows with a null `genres` cell contribute nothing.
    pub fn genre_counts(metadata: &DataFrame) -> Result<Vec<(String, u32)>, StatsError> {
        let genres = metadata.column("genres")?.cast(&DataType::String)?;

        let mut counts: HashMap<String, u32> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for entry in genres.str()? {
            let Some(entry) = entry else {
                continue;
            };
            for token in entry.split(',') {
                let token = token.trim();
                let count = counts.entry(token.to_string()).or_insert_with(|| {
                    order.push(token.to_string());
                    0
                });
                *count += 1;
            }
        }

        let mut result: Vec<(String, u32)> = order
            .into_iter()
            .map(|genre| {
                let count = counts[genre.as_str()];
                (genre, count)
            })
            .collect();
        result.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(result)
    }
}

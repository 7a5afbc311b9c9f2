//! Report Pipeline Module
//! Wires the loader, reporters, merger and exporter into one linear run.

use crate::data::{DataLoader, Exporter, Merger};
use crate::stats::{StatsCalculator, TOP_RATED_COUNT};
use log::{error, info};
use polars::prelude::DataFrame;
use std::path::Path;

/// Runs the report pipeline over the two movie datasets.
///
/// Every step checks that the tables it needs are present; when they are
/// not it logs an error and leaves both the console and its own state
/// untouched, so a missing input degrades the run instead of aborting it.
pub struct MovieReport {
    loader: DataLoader,
    merged: Option<DataFrame>,
}

impl MovieReport {
    pub fn new(metadata_path: &str, ratings_path: &str) -> Self {
        Self {
            loader: DataLoader::new(metadata_path, ratings_path),
            merged: None,
        }
    }

    /// Load both datasets from their CSV files.
    pub fn load_datasets(&mut self) {
        self.loader.load();
    }

    /// Print the number of unique movies in the metadata table.
    pub fn print_unique_movies(&self) {
        let Some(metadata) = self.loader.metadata() else {
            error!("Movies dataset not loaded.");
            return;
        };
        match StatsCalculator::unique_title_count(metadata) {
            Ok(count) => println!("Number of unique movies: {count}"),
            Err(e) => error!("Failed to count unique movies: {e}"),
        }
    }

    /// Print the average rating across all movies.
    pub fn print_average_rating(&self) {
        let Some(ratings) = self.loader.ratings() else {
            error!("Ratings dataset not loaded.");
            return;
        };
        match StatsCalculator::average_rating(ratings) {
            Ok(mean) => println!("Average rating of all movies: {mean}"),
            Err(e) => error!("Failed to compute average rating: {e}"),
        }
    }

    /// Print the five highest rated movies with their scores.
    pub fn print_top_rated_movies(&self) {
        let Some(ratings) = self.loader.ratings() else {
            error!("Ratings dataset not loaded.");
            return;
        };
        let Some(metadata) = self.loader.metadata() else {
            error!("Movies dataset not loaded.");
            return;
        };
        match StatsCalculator::top_rated(metadata, ratings, TOP_RATED_COUNT) {
            Ok(movies) => {
                println!("Top {TOP_RATED_COUNT} highest rated movies:");
                for movie in movies {
                    println!("{}: {}", movie.title, movie.rating);
                }
            }
            Err(e) => error!("Failed to rank movies: {e}"),
        }
    }

    /// Print the number of movies released each year.
    pub fn print_movies_per_year(&self) {
        let Some(metadata) = self.loader.metadata() else {
            error!("Movies dataset not loaded.");
            return;
        };
        match StatsCalculator::releases_per_year(metadata) {
            Ok(per_year) => {
                println!("Number of movies released each year:");
                for (year, count) in per_year {
                    println!("{year}: {count}");
                }
            }
            Err(e) => error!("Failed to count releases per year: {e}"),
        }
    }

    /// Print the number of movies in each genre.
    pub fn print_movies_per_genre(&self) {
        let Some(metadata) = self.loader.metadata() else {
            error!("Movies dataset not loaded.");
            return;
        };
        match StatsCalculator::genre_counts(metadata) {
            Ok(per_genre) => {
                println!("Number of movies in each genre:");
                for (genre, count) in per_genre {
                    println!("{genre}: {count}");
                }
            }
            Err(e) => error!("Failed to count movies per genre: {e}"),
        }
    }

    /// Merge the two datasets on the normalized movie id.
    pub fn merge_datasets(&mut self) {
        let (Some(metadata), Some(ratings)) = (self.loader.metadata(), self.loader.ratings())
        else {
            error!("One or both datasets not loaded.");
            return;
        };
        match Merger::merge(metadata, ratings) {
            Ok(merged) => {
                info!("Datasets merged successfully ({} rows).", merged.height());
                self.merged = Some(merged);
            }
            Err(e) => error!("Failed to merge datasets: {e}"),
        }
    }

    /// Write the merged dataset to a JSON file.
    pub fn save_to_json(&self, path: impl AsRef<Path>) {
        let Some(merged) = self.merged.as_ref() else {
            error!("Combined dataset not available.");
            return;
        };
        let path = path.as_ref();
        match Exporter::write_json(merged, path) {
            Ok(()) => info!("Combined dataset saved to {}.", path.display()),
            Err(e) => error!("Failed to save combined dataset: {e}"),
        }
    }

    #[cfg(test)]
    pub(crate) fn merged(&self) -> Option<&DataFrame> {
        self.merged.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn set_tables(&mut self, metadata: DataFrame, ratings: DataFrame) {
        self.loader.set_tables(metadata, ratings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::{json, Value};

    #[test]
    fn missing_inputs_degrade_every_step() {
        let mut report = MovieReport::new("/nonexistent/meta.csv", "/nonexistent/ratings.csv");
        report.load_datasets();

        // Every operation logs and no-ops; nothing panics and the merged
        // table stays unset.
        report.print_unique_movies();
        report.print_average_rating();
        report.print_top_rated_movies();
        report.print_movies_per_year();
        report.print_movies_per_genre();
        report.merge_datasets();
        report.save_to_json(std::env::temp_dir().join("cinestats_should_not_exist.json"));
        assert!(report.merged().is_none());
    }

    #[test]
    fn schema_mismatch_degrades_to_logged_errors() {
        // Tables are loaded but carry none of the expected columns; every
        // step must surface the column error without panicking, and the
        // merge must leave the combined table unset.
        let metadata = df!("name" => ["A"]).unwrap();
        let ratings = df!("score" => [4.5f64]).unwrap();

        let mut report = MovieReport::new("unused.csv", "unused.csv");
        report.set_tables(metadata, ratings);

        report.print_unique_movies();
        report.print_average_rating();
        report.print_top_rated_movies();
        report.print_movies_per_year();
        report.print_movies_per_genre();
        report.merge_datasets();
        assert!(report.merged().is_none());
    }

    #[test]
    fn merge_then_export_round_trip() {
        let metadata = df!(
            "id" => ["1"],
            "title" => ["A"],
            "release_date" => ["2020-01-01"],
            "genres" => ["Drama, Comedy"],
        )
        .unwrap();
        let ratings = df!(
            "movieId" => [1i64],
            "rating" => [4.5f64],
        )
        .unwrap();

        let mut report = MovieReport::new("unused.csv", "unused.csv");
        report.set_tables(metadata, ratings);
        report.merge_datasets();
        assert_eq!(report.merged().unwrap().height(), 1);

        let path = std::env::temp_dir().join("cinestats_report_round_trip.json");
        report.save_to_json(&path);

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            parsed,
            json!([{
                "id": "1",
                "title": "A",
                "release_date": "2020-01-01",
                "genres": "Drama, Comedy",
                "rating": 4.5,
                "movieId": "1",
            }])
        );
    }
}

//! CineStats - Movie Dataset Analyzer
//!
//! Loads the movie metadata and ratings CSVs, prints a set of descriptive
//! reports, then merges the two tables and exports the result as JSON.

mod data;
mod report;
mod stats;

use report::MovieReport;

const METADATA_CSV: &str = "movies_metadata.csv";
const RATINGS_CSV: &str = "ratings.csv";
const OUTPUT_JSON: &str = "combined_dataset.json";

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut report = MovieReport::new(METADATA_CSV, RATINGS_CSV);
    report.load_datasets();
    report.print_unique_movies();
    report.print_average_rating();
    report.print_top_rated_movies();
    report.print_movies_per_year();
    report.print_movies_per_genre();
    report.merge_datasets();
    report.save_to_json(OUTPUT_JSON);
}

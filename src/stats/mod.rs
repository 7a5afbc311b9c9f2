//! Stats module - descriptive reports over the loaded tables

mod calculator;

pub use calculator::{RatedMovie, StatsCalculator, TOP_RATED_COUNT};

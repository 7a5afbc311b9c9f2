//! Data module - CSV loading, merging and JSON export

mod exporter;
mod loader;
mod merger;

pub use exporter::Exporter;
pub use loader::DataLoader;
pub use merger::Merger;

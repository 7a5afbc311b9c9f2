//! JSON Exporter Module
//! Serializes a DataFrame as a JSON array of flat record objects.

use polars::prelude::*;
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to write output file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Writes the combined dataset to disk as records-oriented JSON.
pub struct Exporter;

impl Exporter {
    /// Serialize every row as one JSON object, the whole file being a JSON
    /// array. Field order follows column order; integer columns serialize
    /// without a decimal point, floats with one, nulls as JSON null. The
    /// destination is overwritten unconditionally.
    pub fn write_json(df: &DataFrame, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let columns = df.get_columns();
        let mut records: Vec<Value> = Vec::with_capacity(df.height());

        for i in 0..df.height() {
            let mut record = Map::new();
            for column in columns {
                record.insert(column.name().to_string(), Self::json_value(column.get(i)?));
            }
            records.push(Value::Object(record));
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &records)?;
        writer.flush()?;
        Ok(())
    }

    /// Map a single cell to its JSON representation.
    fn json_value(value: AnyValue) -> Value {
        match value {
            AnyValue::Null => Value::Null,
            AnyValue::Boolean(b) => Value::Bool(b),
            AnyValue::String(s) => Value::String(s.to_string()),
            AnyValue::StringOwned(s) => Value::String(s.to_string()),
            AnyValue::Int8(v) => Value::from(v),
            AnyValue::Int16(v) => Value::from(v),
            AnyValue::Int32(v) => Value::from(v),
            AnyValue::Int64(v) => Value::from(v),
            AnyValue::UInt8(v) => Value::from(v),
            AnyValue::UInt16(v) => Value::from(v),
            AnyValue::UInt32(v) => Value::from(v),
            AnyValue::UInt64(v) => Value::from(v),
            AnyValue::Float32(v) => Number::from_f64(f64::from(v))
                .map(Value::Number)
                .unwrap_or(Value::Null),
            AnyValue::Float64(v) => Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null),
            // Dates and any remaining dtypes fall back to their display form.
            other => Value::String(other.to_string().trim_matches('"').to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_records_oriented_json() {
        let df = df!(
            "id" => ["1", "2"],
            "title" => ["A", "B"],
            "rating" => [4.5f64, 3.0],
            "votes" => [10i64, 25],
        )
        .unwrap();

        let path = std::env::temp_dir().join("cinestats_export_records.json");
        Exporter::write_json(&df, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(
            parsed,
            json!([
                {"id": "1", "title": "A", "rating": 4.5, "votes": 10},
                {"id": "2", "title": "B", "rating": 3.0, "votes": 25},
            ])
        );
        // Integers must not pick up a decimal point.
        assert!(contents.contains("\"votes\":10"));
    }

    #[test]
    fn nulls_serialize_as_json_null() {
        let df = df!(
            "title" => [Some("A"), None],
            "rating" => [Some(4.0f64), None],
        )
        .unwrap();

        let path = std::env::temp_dir().join("cinestats_export_nulls.json");
        Exporter::write_json(&df, &path).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            parsed,
            json!([
                {"title": "A", "rating": 4.0},
                {"title": null, "rating": null},
            ])
        );
    }

    #[test]
    fn overwrites_existing_destination() {
        let path = std::env::temp_dir().join("cinestats_export_overwrite.json");
        std::fs::write(&path, "stale contents").unwrap();

        let df = df!("id" => ["1"]).unwrap();
        Exporter::write_json(&df, &path).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, json!([{"id": "1"}]));
    }
}

//! Synthetic data generation from a schema definition.

use std::path::Path;

use crate::error::{Result, TabqaError};
use crate::input::DataTable;
use crate::schema::{SchemaDefinition, TypeCategory};

/// Sample texts for free-text string columns.
const TEXT_SAMPLES: &[&str] = &[
    "Great product!",
    "Awful experience",
    "meh",
    "Absolutely loved it!",
    "This was fine",
    "Could be better",
    "I want my money back",
];

/// Sample labels for label-like string columns.
const LABEL_SAMPLES: &[&str] = &["positive", "neutral", "negative"];

/// Generate a dataset conforming to the schema. Deterministic for a
/// given seed.
pub fn generate_synthetic(schema: &SchemaDefinition, rows: usize, seed: u64) -> DataTable {
    let mut rng = fastrand::Rng::with_seed(seed);

    let headers: Vec<String> = schema.columns.keys().cloned().collect();
    let mut columns: Vec<Vec<String>> = Vec::with_capacity(headers.len());

    for (name, tag) in &schema.columns {
        let values: Vec<String> = match TypeCategory::from_tag(tag) {
            Ok(TypeCategory::Integer) => {
                (0..rows).map(|_| rng.i64(0..1_000_000).to_string()).collect()
            }
            Ok(TypeCategory::Float) => (0..rows).map(|_| normal(&mut rng).to_string()).collect(),
            Ok(TypeCategory::Boolean) => (0..rows).map(|_| rng.bool().to_string()).collect(),
            Ok(TypeCategory::String) => match name.as_str() {
                "label" => (0..rows)
                    .map(|_| LABEL_SAMPLES[rng.usize(0..LABEL_SAMPLES.len())].to_string())
                    .collect(),
                "text" => (0..rows)
                    .map(|_| TEXT_SAMPLES[rng.usize(0..TEXT_SAMPLES.len())].to_string())
                    .collect(),
                _ => (0..rows).map(|i| format!("str_{i}")).collect(),
            },
            // Unknown tags still produce placeholder values; load-time
            // checking is the schema loader's job, not the generator's.
            Err(_) => (0..rows).map(|i| format!("val_{i}")).collect(),
        };
        columns.push(values);
    }

    let table_rows: Vec<Vec<String>> = (0..rows)
        .map(|row| columns.iter().map(|col| col[row].clone()).collect())
        .collect();

    DataTable::new(headers, table_rows)
}

/// Approximate a standard normal draw (Irwin-Hall, 12 uniforms).
fn normal(rng: &mut fastrand::Rng) -> f64 {
    (0..12).map(|_| rng.f64()).sum::<f64>() - 6.0
}

/// Write a data table as CSV.
pub fn write_csv(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(TabqaError::Csv)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| TabqaError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

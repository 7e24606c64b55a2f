//! Schema definition document and type-tag categories.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TabqaError};
use crate::input::DataTable;

/// Broad type category a concrete type tag belongs to. Tags are compared
/// by category, so any integer width matches `int`, any float width
/// matches `float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    /// Whole numbers (int8..int64, uint*).
    Integer,
    /// Floating-point numbers (float32, float64, double).
    Float,
    /// Boolean values.
    Boolean,
    /// Text/object-like values.
    String,
}

impl TypeCategory {
    /// Map a concrete type tag (e.g. `int64`, `float32`, `string`) to its
    /// category. Unknown tags are a configuration error.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let lower = tag.trim().to_lowercase();
        if lower.starts_with("int") || lower.starts_with("uint") {
            Ok(TypeCategory::Integer)
        } else if lower.starts_with("float") || lower == "double" {
            Ok(TypeCategory::Float)
        } else if lower.starts_with("bool") {
            Ok(TypeCategory::Boolean)
        } else if matches!(lower.as_str(), "string" | "str" | "object" | "text") {
            Ok(TypeCategory::String)
        } else {
            Err(TabqaError::Schema(format!("unknown type tag '{tag}'")))
        }
    }

    /// Canonical tag reported for a column of this category.
    pub fn canonical_tag(&self) -> &'static str {
        match self {
            TypeCategory::Integer => "int64",
            TypeCategory::Float => "float64",
            TypeCategory::Boolean => "bool",
            TypeCategory::String => "string",
        }
    }

    /// Infer the category of a dataset column from its values. All
    /// non-null values must agree; anything that is not uniformly
    /// integer, float, or boolean is treated as string data.
    pub fn infer(table: &DataTable, index: usize) -> Self {
        let mut saw_value = false;
        let mut all_int = true;
        let mut all_float = true;
        let mut all_bool = true;

        for value in table.column_values(index) {
            if DataTable::is_null_value(value) {
                continue;
            }
            saw_value = true;
            let trimmed = value.trim();
            if all_int && trimmed.parse::<i64>().is_err() {
                all_int = false;
            }
            if all_float && trimmed.parse::<f64>().is_err() {
                all_float = false;
            }
            if all_bool
                && !matches!(
                    trimmed.to_lowercase().as_str(),
                    "true" | "false" | "yes" | "no" | "t" | "f" | "y" | "n"
                )
            {
                all_bool = false;
            }
        }

        if !saw_value {
            TypeCategory::String
        } else if all_int {
            TypeCategory::Integer
        } else if all_float {
            TypeCategory::Float
        } else if all_bool {
            TypeCategory::Boolean
        } else {
            TypeCategory::String
        }
    }
}

/// Structural schema for a dataset: expected type tag per column plus the
/// set of columns that must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Column name -> expected type tag, in declaration order.
    pub columns: IndexMap<String, String>,
    /// Columns that must be present in the dataset.
    #[serde(default)]
    pub required: Vec<String>,
}

impl SchemaDefinition {
    /// Load a schema definition from a JSON file, rejecting unknown type
    /// tags up front so validation never starts on a bad document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TabqaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let schema: SchemaDefinition = serde_json::from_reader(BufReader::new(file))?;
        schema.check_tags()?;
        Ok(schema)
    }

    /// Verify every declared type tag maps to a known category.
    pub fn check_tags(&self) -> Result<()> {
        for (column, tag) in &self.columns {
            TypeCategory::from_tag(tag).map_err(|_| {
                TabqaError::Schema(format!("unknown type tag '{tag}' for column '{column}'"))
            })?;
        }
        Ok(())
    }
}

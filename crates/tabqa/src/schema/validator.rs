//! Schema validation: checks a dataset against a schema definition.

use serde::{Deserialize, Serialize};

use super::definition::{SchemaDefinition, TypeCategory};
use crate::input::DataTable;
use crate::status::Status;

/// A structural error found during schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaError {
    /// A required column is absent from the dataset.
    MissingRequiredColumn { column: String },
    /// A column's data does not match its declared type tag.
    WrongDtype {
        column: String,
        expected: String,
        actual: String,
    },
}

/// Result of validating a dataset against a schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaResult {
    pub status: Status,
    pub errors: Vec<SchemaError>,
}

impl SchemaResult {
    fn from_errors(errors: Vec<SchemaError>) -> Self {
        Self {
            status: Status::from_failed(!errors.is_empty()),
            errors,
        }
    }
}

/// Checks datasets against a column/type/required-columns schema.
///
/// Stateless; the dataset is never modified and absent columns only
/// produce structured errors, never panics.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a dataset. Required-column checks run first in schema
    /// declaration order, then type checks in column declaration order.
    pub fn validate(&self, table: &DataTable, schema: &SchemaDefinition) -> SchemaResult {
        let mut errors = Vec::new();

        for column in &schema.required {
            if !table.has_column(column) {
                errors.push(SchemaError::MissingRequiredColumn {
                    column: column.clone(),
                });
            }
        }

        for (column, tag) in &schema.columns {
            let Some(index) = table.column_index(column) else {
                continue;
            };
            // Hand-built definitions may carry tags load() never checked.
            let Ok(expected) = TypeCategory::from_tag(tag) else {
                errors.push(SchemaError::WrongDtype {
                    column: column.clone(),
                    expected: tag.clone(),
                    actual: "unknown".to_string(),
                });
                continue;
            };

            let actual = TypeCategory::infer(table, index);
            if actual != expected {
                errors.push(SchemaError::WrongDtype {
                    column: column.clone(),
                    expected: tag.clone(),
                    actual: actual.canonical_tag().to_string(),
                });
            }
        }

        SchemaResult::from_errors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
    }

    fn make_schema(columns: Vec<(&str, &str)>, required: Vec<&str>) -> SchemaDefinition {
        SchemaDefinition {
            columns: columns
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<IndexMap<_, _>>(),
            required: required.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let table = make_table(vec!["id"], vec![vec!["1"]]);
        let schema = make_schema(
            vec![("id", "int64"), ("label", "string")],
            vec!["id", "label"],
        );

        let result = SchemaValidator.validate(&table, &schema);
        assert_eq!(result.status, Status::Fail);
        assert_eq!(
            result.errors,
            vec![SchemaError::MissingRequiredColumn {
                column: "label".to_string()
            }]
        );
    }

    #[test]
    fn test_wrong_dtype() {
        let table = make_table(vec!["age"], vec![vec!["young"], vec!["old"]]);
        let schema = make_schema(vec![("age", "int64")], vec![]);

        let result = SchemaValidator.validate(&table, &schema);
        assert_eq!(result.status, Status::Fail);
        assert_eq!(
            result.errors,
            vec![SchemaError::WrongDtype {
                column: "age".to_string(),
                expected: "int64".to_string(),
                actual: "string".to_string(),
            }]
        );
    }

    #[test]
    fn test_string_tag_rejects_numeric_column() {
        // A string-declared column of uniformly numeric data infers as
        // int64, which does not satisfy the tag.
        let table = make_table(vec!["zip"], vec![vec!["12345"], vec!["67890"]]);
        let schema = make_schema(vec![("zip", "string")], vec![]);

        let result = SchemaValidator.validate(&table, &schema);
        assert_eq!(result.status, Status::Fail);
        assert_eq!(
            result.errors,
            vec![SchemaError::WrongDtype {
                column: "zip".to_string(),
                expected: "string".to_string(),
                actual: "int64".to_string(),
            }]
        );
    }

    #[test]
    fn test_integer_width_is_loose() {
        // Any integer-looking data satisfies any int* tag.
        let table = make_table(vec!["n"], vec![vec!["1"], vec!["2"]]);
        let schema = make_schema(vec![("n", "int32")], vec![]);

        let result = SchemaValidator.validate(&table, &schema);
        assert_eq!(result.status, Status::Pass);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_required_errors_come_first() {
        let table = make_table(vec!["age"], vec![vec!["young"]]);
        let schema = make_schema(vec![("age", "int64")], vec!["missing"]);

        let result = SchemaValidator.validate(&table, &schema);
        assert_eq!(result.errors.len(), 2);
        assert!(matches!(
            result.errors[0],
            SchemaError::MissingRequiredColumn { .. }
        ));
        assert!(matches!(result.errors[1], SchemaError::WrongDtype { .. }));
    }

    #[test]
    fn test_pass_on_conforming_data() {
        let table = make_table(
            vec!["id", "score", "label"],
            vec![vec!["1", "0.5", "positive"], vec!["2", "0.9", "neutral"]],
        );
        let schema = make_schema(
            vec![("id", "int64"), ("score", "float64"), ("label", "string")],
            vec!["id", "score", "label"],
        );

        let result = SchemaValidator.validate(&table, &schema);
        assert_eq!(result.status, Status::Pass);
    }
}

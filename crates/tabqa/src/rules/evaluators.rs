//! Built-in rule evaluators.
//!
//! Each evaluator is a pure function over the dataset: it computes a
//! violation predicate (per-row or aggregate), counts violating rows, and
//! derives its status from the count or the rule's own threshold. No
//! evaluator mutates the dataset.

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::config::RuleDefinition;
use super::registry::RuleEvaluator;
use super::result::{fraction, RuleResult};
use crate::error::{Result, TabqaError};
use crate::input::DataTable;

/// Parse a rule's raw parameter map into a typed parameter struct.
fn parse_params<T: DeserializeOwned>(rule: &RuleDefinition) -> Result<T> {
    serde_json::from_value(Value::Object(rule.params.clone())).map_err(|e| {
        TabqaError::InvalidRule {
            rule: rule.name.clone(),
            kind: rule.kind.clone(),
            message: e.to_string(),
        }
    })
}

/// Resolve a referenced column, failing the whole batch when absent.
fn column_index(table: &DataTable, rule: &RuleDefinition, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| TabqaError::MissingColumn {
            rule: rule.name.clone(),
            column: column.to_string(),
        })
}

/// Unwrap the object produced by `json!({...})` into a details map.
fn details(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Null values compare as the empty string in textual rules.
fn as_text(value: &str) -> &str {
    if DataTable::is_null_value(value) {
        ""
    } else {
        value
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// regex
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegexParams {
    column: String,
    pattern: String,
    /// Flag string; `IGNORECASE` enables case-insensitive matching.
    #[serde(default)]
    flags: String,
    /// When true, matching rows are the violations.
    #[serde(default)]
    fail_on_match: bool,
}

/// Checks each value against a pattern anchored at the start of the text.
pub struct RegexEvaluator;

impl RuleEvaluator for RegexEvaluator {
    fn kind(&self) -> &'static str {
        "regex"
    }

    fn evaluate(&self, table: &DataTable, rule: &RuleDefinition) -> Result<RuleResult> {
        let params: RegexParams = parse_params(rule)?;
        let index = column_index(table, rule, &params.column)?;

        // Anchored to preserve match-at-start semantics.
        let pattern = RegexBuilder::new(&format!("^(?:{})", params.pattern))
            .case_insensitive(params.flags.contains("IGNORECASE"))
            .build()?;

        let mut violations = Vec::new();
        for (row, value) in table.column_values(index).enumerate() {
            let matched = pattern.is_match(as_text(value));
            if matched == params.fail_on_match {
                violations.push(row);
            }
        }

        Ok(RuleResult::per_row(
            &rule.name,
            self.kind(),
            violations,
            table.row_count(),
            details(json!({
                "column": params.column,
                "pattern": params.pattern,
                "fail_on_match": params.fail_on_match,
            })),
        ))
    }
}

// ---------------------------------------------------------------------------
// numeric_range
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NumericRangeParams {
    column: String,
    /// Lower bound; unbounded when absent.
    min: Option<f64>,
    /// Upper bound; unbounded when absent.
    max: Option<f64>,
    #[serde(default = "default_true")]
    inclusive: bool,
}

/// Checks numeric values against a [min, max] interval. Values that do
/// not coerce to a number (including nulls) fail the bound check.
pub struct NumericRangeEvaluator;

impl RuleEvaluator for NumericRangeEvaluator {
    fn kind(&self) -> &'static str {
        "numeric_range"
    }

    fn evaluate(&self, table: &DataTable, rule: &RuleDefinition) -> Result<RuleResult> {
        let params: NumericRangeParams = parse_params(rule)?;
        let index = column_index(table, rule, &params.column)?;

        let min = params.min.unwrap_or(f64::NEG_INFINITY);
        let max = params.max.unwrap_or(f64::INFINITY);

        let mut violations = Vec::new();
        for (row, value) in table.column_values(index).enumerate() {
            let out_of_range = match value.trim().parse::<f64>() {
                Ok(v) if !v.is_nan() => {
                    if params.inclusive {
                        v < min || v > max
                    } else {
                        v <= min || v >= max
                    }
                }
                _ => true,
            };
            if out_of_range {
                violations.push(row);
            }
        }

        Ok(RuleResult::per_row(
            &rule.name,
            self.kind(),
            violations,
            table.row_count(),
            details(json!({
                "column": params.column,
                "min": params.min,
                "max": params.max,
                "inclusive": params.inclusive,
            })),
        ))
    }
}

// ---------------------------------------------------------------------------
// allowed_values
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AllowedValuesParams {
    column: String,
    values: Vec<String>,
}

/// Checks that each value is a member of the allowed set.
pub struct AllowedValuesEvaluator;

impl RuleEvaluator for AllowedValuesEvaluator {
    fn kind(&self) -> &'static str {
        "allowed_values"
    }

    fn evaluate(&self, table: &DataTable, rule: &RuleDefinition) -> Result<RuleResult> {
        let params: AllowedValuesParams = parse_params(rule)?;
        let index = column_index(table, rule, &params.column)?;

        let allowed: HashSet<&str> = params.values.iter().map(|s| s.as_str()).collect();

        let mut violations = Vec::new();
        for (row, value) in table.column_values(index).enumerate() {
            if !allowed.contains(value) {
                violations.push(row);
            }
        }

        Ok(RuleResult::per_row(
            &rule.name,
            self.kind(),
            violations,
            table.row_count(),
            details(json!({
                "column": params.column,
                "values": params.values,
            })),
        ))
    }
}

// ---------------------------------------------------------------------------
// null_fraction
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NullFractionParams {
    column: String,
    max_fraction: f64,
}

/// Aggregate rule: fails when the null fraction exceeds the threshold.
pub struct NullFractionEvaluator;

impl RuleEvaluator for NullFractionEvaluator {
    fn kind(&self) -> &'static str {
        "null_fraction"
    }

    fn evaluate(&self, table: &DataTable, rule: &RuleDefinition) -> Result<RuleResult> {
        let params: NullFractionParams = parse_params(rule)?;
        let index = column_index(table, rule, &params.column)?;

        let violations: Vec<usize> = table
            .column_values(index)
            .enumerate()
            .filter(|(_, v)| DataTable::is_null_value(v))
            .map(|(row, _)| row)
            .collect();

        let null_fraction = fraction(violations.len(), table.row_count());
        let failed = null_fraction > params.max_fraction;

        Ok(RuleResult::with_status(
            &rule.name,
            self.kind(),
            violations,
            table.row_count(),
            failed,
            details(json!({
                "column": params.column,
                "max_fraction": params.max_fraction,
            })),
        ))
    }
}

// ---------------------------------------------------------------------------
// unique_fraction
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UniqueFractionParams {
    column: String,
    min_fraction: f64,
}

/// Aggregate rule: fails when the distinct-value fraction falls below the
/// threshold. All nulls count as one category; repeat occurrences beyond
/// the first are the reported violations.
pub struct UniqueFractionEvaluator;

impl RuleEvaluator for UniqueFractionEvaluator {
    fn kind(&self) -> &'static str {
        "unique_fraction"
    }

    fn evaluate(&self, table: &DataTable, rule: &RuleDefinition) -> Result<RuleResult> {
        let params: UniqueFractionParams = parse_params(rule)?;
        let index = column_index(table, rule, &params.column)?;

        let mut seen: HashSet<Option<&str>> = HashSet::new();
        let mut violations = Vec::new();
        for (row, value) in table.column_values(index).enumerate() {
            let key = if DataTable::is_null_value(value) {
                None
            } else {
                Some(value)
            };
            if !seen.insert(key) {
                violations.push(row);
            }
        }

        let row_count = table.row_count();
        let unique_fraction = fraction(seen.len(), row_count);
        let failed = unique_fraction < params.min_fraction;

        Ok(RuleResult::with_status(
            &rule.name,
            self.kind(),
            violations,
            row_count,
            failed,
            details(json!({
                "column": params.column,
                "min_fraction": params.min_fraction,
            })),
        ))
    }
}

// ---------------------------------------------------------------------------
// length_range
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LengthRangeParams {
    column: String,
    #[serde(default)]
    min_len: usize,
    /// Unbounded when absent.
    max_len: Option<usize>,
}

/// Checks the character length of each value's textual representation.
pub struct LengthRangeEvaluator;

impl RuleEvaluator for LengthRangeEvaluator {
    fn kind(&self) -> &'static str {
        "length_range"
    }

    fn evaluate(&self, table: &DataTable, rule: &RuleDefinition) -> Result<RuleResult> {
        let params: LengthRangeParams = parse_params(rule)?;
        let index = column_index(table, rule, &params.column)?;

        let mut violations = Vec::new();
        for (row, value) in table.column_values(index).enumerate() {
            let len = as_text(value).chars().count();
            if len < params.min_len || params.max_len.is_some_and(|max| len > max) {
                violations.push(row);
            }
        }

        Ok(RuleResult::per_row(
            &rule.name,
            self.kind(),
            violations,
            table.row_count(),
            details(json!({
                "column": params.column,
                "min_len": params.min_len,
                "max_len": params.max_len,
            })),
        ))
    }
}

// ---------------------------------------------------------------------------
// duplicate_rows
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DuplicateRowsParams {
    /// Columns to compare; all columns when absent.
    subset: Option<Vec<String>>,
    #[serde(default)]
    max_fraction: f64,
}

/// Aggregate rule over whole rows: every member of an exact-match
/// duplicate group counts, including the first occurrence.
pub struct DuplicateRowsEvaluator;

impl RuleEvaluator for DuplicateRowsEvaluator {
    fn kind(&self) -> &'static str {
        "duplicate_rows"
    }

    fn evaluate(&self, table: &DataTable, rule: &RuleDefinition) -> Result<RuleResult> {
        let params: DuplicateRowsParams = parse_params(rule)?;

        let indices: Vec<usize> = match &params.subset {
            Some(columns) => columns
                .iter()
                .map(|c| column_index(table, rule, c))
                .collect::<Result<_>>()?,
            None => (0..table.column_count()).collect(),
        };

        let mut groups: IndexMap<Vec<&str>, Vec<usize>> = IndexMap::new();
        for (row_idx, row) in table.rows.iter().enumerate() {
            let key: Vec<&str> = indices
                .iter()
                .map(|&i| row.get(i).map(|s| s.as_str()).unwrap_or(""))
                .collect();
            groups.entry(key).or_default().push(row_idx);
        }

        let mut violations: Vec<usize> = groups
            .values()
            .filter(|rows| rows.len() > 1)
            .flatten()
            .copied()
            .collect();
        violations.sort_unstable();

        let row_count = table.row_count();
        let duplicate_fraction = fraction(violations.len(), row_count);
        let failed = duplicate_fraction > params.max_fraction;

        Ok(RuleResult::with_status(
            &rule.name,
            self.kind(),
            violations,
            row_count,
            failed,
            details(json!({
                "subset": params.subset,
                "max_fraction": params.max_fraction,
            })),
        ))
    }
}

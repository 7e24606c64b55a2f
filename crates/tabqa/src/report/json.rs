//! JSON report: direct serialization of the outcome plus severity labels.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde_json::{json, Value};

use crate::engine::ValidationOutcome;
use crate::error::{Result, TabqaError};
use crate::rules::GlobalConfig;

/// Build the serializable report document. Each rule is annotated with
/// its severity label and its violation sample is truncated to
/// `global.sample_violations`.
pub fn build_report(outcome: &ValidationOutcome, global: &GlobalConfig) -> Result<Value> {
    let mut rules = Vec::with_capacity(outcome.rules.len());
    for rule in &outcome.rules {
        let mut value = serde_json::to_value(rule)?;
        if let Value::Object(ref mut map) = value {
            map.insert(
                "severity".to_string(),
                Value::String(global.severity_for(&rule.kind).to_string()),
            );
            let sample: Vec<usize> = rule
                .violation_rows
                .iter()
                .take(global.sample_violations)
                .copied()
                .collect();
            map.insert("sample_rows".to_string(), json!(sample));
            // The full index list can be as long as the dataset; the
            // report carries only the bounded sample.
            map.remove("violation_rows");
        }
        rules.push(value);
    }

    Ok(json!({
        "rules": rules,
        "schema": serde_json::to_value(&outcome.schema)?,
        "n_rows": outcome.n_rows,
    }))
}

/// Write the JSON report, creating parent directories as needed.
pub fn write_json_report(
    path: impl AsRef<Path>,
    outcome: &ValidationOutcome,
    global: &GlobalConfig,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| TabqaError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let report = build_report(outcome, global)?;
    let file = File::create(path).map_err(|e| TabqaError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QaEngine;
    use crate::input::DataTable;
    use crate::rules::RulesConfig;
    use crate::schema::SchemaDefinition;

    fn sample_outcome() -> (ValidationOutcome, GlobalConfig) {
        let table = DataTable::new(
            vec!["label".to_string()],
            vec![
                vec!["positive".to_string()],
                vec!["neutral".to_string()],
                vec!["negative".to_string()],
            ],
        );
        let schema: SchemaDefinition =
            serde_json::from_str(r#"{"columns": {"label": "string"}, "required": ["label"]}"#)
                .unwrap();
        let rules: RulesConfig = serde_yaml::from_str(
            r#"
rules:
  - {name: labels, type: allowed_values, column: label, values: [positive, neutral]}
global:
  sample_violations: 1
  severity_map:
    allowed_values: ERROR
"#,
        )
        .unwrap();

        let outcome = QaEngine::new().validate(&table, &schema, &rules).unwrap();
        (outcome, rules.global)
    }

    #[test]
    fn test_report_shape() {
        let (outcome, global) = sample_outcome();
        let report = build_report(&outcome, &global).unwrap();

        assert_eq!(report["n_rows"], 3);
        assert_eq!(report["schema"]["status"], "pass");
        let rule = &report["rules"][0];
        assert_eq!(rule["name"], "labels");
        assert_eq!(rule["status"], "fail");
        assert_eq!(rule["n_violations"], 1);
        assert_eq!(rule["severity"], "ERROR");
        assert_eq!(rule["sample_rows"], json!([2]));
        assert!(rule.get("violation_rows").is_none());
    }

    #[test]
    fn test_unmapped_kind_defaults_to_info() {
        let (outcome, _) = sample_outcome();
        let report = build_report(&outcome, &GlobalConfig::default()).unwrap();
        assert_eq!(report["rules"][0]["severity"], "INFO");
    }
}

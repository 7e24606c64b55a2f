//! Integration tests for tabqa.

use std::io::Write;
use tempfile::NamedTempFile;

use tabqa::{
    build_report, generate_synthetic, Loader, QaEngine, RulesConfig, SchemaDefinition,
    SchemaError, SchemaValidator, Status, TabqaError,
};

/// Helper to create a temporary file with given content and extension.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

// =============================================================================
// End-to-End Validation Tests
// =============================================================================

#[test]
fn test_validate_pass_end_to_end() {
    let data = create_test_file(
        "id,text,label\n1,ok,positive\n2,bad,neutral\n",
        ".csv",
    );
    let schema = create_test_file(
        r#"{"columns": {"id": "int64", "text": "string", "label": "string"}, "required": ["id", "text", "label"]}"#,
        ".json",
    );
    let rules = create_test_file(
        "rules:\n  - name: allowed\n    type: allowed_values\n    column: label\n    values: [positive, neutral]\n",
        ".yml",
    );

    let (table, source) = Loader::new().load_file(data.path()).expect("load failed");
    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 2);

    let schema_def = SchemaDefinition::load(schema.path()).expect("schema load failed");
    let rules_cfg = RulesConfig::load(rules.path()).expect("rules load failed");

    let outcome = QaEngine::new()
        .validate(&table, &schema_def, &rules_cfg)
        .expect("validation failed");

    assert_eq!(outcome.schema.status, Status::Pass);
    assert_eq!(outcome.rules.len(), 1);
    assert_eq!(outcome.rules[0].status, Status::Pass);
    assert_eq!(outcome.overall_status(), Status::Pass);
}

#[test]
fn test_missing_required_column_fails_schema() {
    let data = create_test_file("id\n1\n2\n", ".csv");
    let schema = create_test_file(
        r#"{"columns": {"id": "int64", "label": "string"}, "required": ["id", "label"]}"#,
        ".json",
    );

    let (table, _) = Loader::new().load_file(data.path()).unwrap();
    let schema_def = SchemaDefinition::load(schema.path()).unwrap();

    let result = SchemaValidator.validate(&table, &schema_def);
    assert_eq!(result.status, Status::Fail);
    assert_eq!(
        result.errors,
        vec![SchemaError::MissingRequiredColumn {
            column: "label".to_string()
        }]
    );
}

#[test]
fn test_allowed_values_violation_counts() {
    let data = create_test_file("label\npositive\nneutral\nnegative\n", ".csv");
    let rules = create_test_file(
        "rules:\n  - name: allowed\n    type: allowed_values\n    column: label\n    values: [positive, neutral]\n",
        ".yml",
    );
    let schema = create_test_file(r#"{"columns": {"label": "string"}, "required": []}"#, ".json");

    let (table, _) = Loader::new().load_file(data.path()).unwrap();
    let schema_def = SchemaDefinition::load(schema.path()).unwrap();
    let rules_cfg = RulesConfig::load(rules.path()).unwrap();

    let outcome = QaEngine::new()
        .validate(&table, &schema_def, &rules_cfg)
        .unwrap();

    let rule = &outcome.rules[0];
    assert_eq!(rule.status, Status::Fail);
    assert_eq!(rule.n_violations, 1);
    assert!((rule.fraction_violations - 0.333).abs() < 0.001);
    assert_eq!(outcome.overall_status(), Status::Fail);
}

#[test]
fn test_unknown_rule_kind_aborts_run() {
    let table = tabqa::DataTable::new(
        vec!["x".to_string()],
        vec![vec!["1".to_string()]],
    );
    let schema_def: SchemaDefinition =
        serde_json::from_str(r#"{"columns": {"x": "int64"}, "required": []}"#).unwrap();
    let rules_cfg: RulesConfig =
        serde_yaml::from_str("rules:\n  - {name: broken, type: bogus}\n").unwrap();

    let err = QaEngine::new()
        .validate(&table, &schema_def, &rules_cfg)
        .unwrap_err();
    assert!(matches!(err, TabqaError::UnknownRuleKind(kind) if kind == "bogus"));
}

#[test]
fn test_missing_referenced_column_aborts_run() {
    let table = tabqa::DataTable::new(
        vec!["x".to_string()],
        vec![vec!["1".to_string()]],
    );
    let schema_def: SchemaDefinition =
        serde_json::from_str(r#"{"columns": {"x": "int64"}, "required": []}"#).unwrap();
    let rules_cfg: RulesConfig = serde_yaml::from_str(
        "rules:\n  - {name: ghost, type: null_fraction, column: nope, max_fraction: 0.1}\n",
    )
    .unwrap();

    let err = QaEngine::new()
        .validate(&table, &schema_def, &rules_cfg)
        .unwrap_err();
    match err {
        TabqaError::MissingColumn { rule, column } => {
            assert_eq!(rule, "ghost");
            assert_eq!(column, "nope");
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_duplicate_rows_keep_none_semantics() {
    let data = create_test_file("a,b\n1,1\n1,1\n2,2\n", ".csv");
    let rules = create_test_file("rules:\n  - {name: dups, type: duplicate_rows}\n", ".yml");
    let schema = create_test_file(r#"{"columns": {}, "required": []}"#, ".json");

    let (table, _) = Loader::new().load_file(data.path()).unwrap();
    let schema_def = SchemaDefinition::load(schema.path()).unwrap();
    let rules_cfg = RulesConfig::load(rules.path()).unwrap();

    let outcome = QaEngine::new()
        .validate(&table, &schema_def, &rules_cfg)
        .unwrap();
    let rule = &outcome.rules[0];
    assert_eq!(rule.n_violations, 2);
    assert!((rule.fraction_violations - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_results_follow_declaration_order_mixed_statuses() {
    let data = create_test_file("id,score\n1,0.5\n2,1.5\n1,0.5\n", ".csv");
    let schema = create_test_file(
        r#"{"columns": {"id": "int64", "score": "float64"}, "required": ["id"]}"#,
        ".json",
    );
    let rules = create_test_file(
        r#"
rules:
  - {name: score_range, type: numeric_range, column: score, min: 0.0, max: 1.0}
  - {name: id_unique, type: unique_fraction, column: id, min_fraction: 1.0}
  - {name: id_positive, type: numeric_range, column: id, min: 1}
"#,
        ".yml",
    );

    let (table, _) = Loader::new().load_file(data.path()).unwrap();
    let schema_def = SchemaDefinition::load(schema.path()).unwrap();
    let rules_cfg = RulesConfig::load(rules.path()).unwrap();

    let outcome = QaEngine::new()
        .validate(&table, &schema_def, &rules_cfg)
        .unwrap();

    let names: Vec<&str> = outcome.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["score_range", "id_unique", "id_positive"]);
    assert_eq!(outcome.rules[0].status, Status::Fail);
    assert_eq!(outcome.rules[1].status, Status::Fail);
    assert_eq!(outcome.rules[2].status, Status::Pass);
}

// =============================================================================
// Report Tests
// =============================================================================

#[test]
fn test_json_report_contents() {
    let data = create_test_file("label\npositive\nnegative\n", ".csv");
    let schema = create_test_file(r#"{"columns": {"label": "string"}, "required": ["label"]}"#, ".json");
    let rules = create_test_file(
        r#"
rules:
  - {name: allowed, type: allowed_values, column: label, values: [positive]}
global:
  sample_violations: 3
  severity_map:
    allowed_values: CRITICAL
"#,
        ".yml",
    );

    let (table, _) = Loader::new().load_file(data.path()).unwrap();
    let schema_def = SchemaDefinition::load(schema.path()).unwrap();
    let rules_cfg = RulesConfig::load(rules.path()).unwrap();

    let outcome = QaEngine::new()
        .validate(&table, &schema_def, &rules_cfg)
        .unwrap();
    let report = build_report(&outcome, &rules_cfg.global).unwrap();

    assert_eq!(report["n_rows"], 2);
    assert_eq!(report["schema"]["status"], "pass");
    assert_eq!(report["rules"][0]["severity"], "CRITICAL");
    assert_eq!(report["rules"][0]["sample_rows"][0], 1);
}

#[test]
fn test_json_report_written_to_disk() {
    let data = create_test_file("x\n1\n", ".csv");
    let schema = create_test_file(r#"{"columns": {"x": "int64"}, "required": []}"#, ".json");
    let rules = create_test_file("rules: []\n", ".yml");

    let (table, _) = Loader::new().load_file(data.path()).unwrap();
    let schema_def = SchemaDefinition::load(schema.path()).unwrap();
    let rules_cfg = RulesConfig::load(rules.path()).unwrap();
    let outcome = QaEngine::new()
        .validate(&table, &schema_def, &rules_cfg)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("report.json");
    tabqa::write_json_report(&path, &outcome, &rules_cfg.global).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(parsed.get("rules").is_some());
    assert_eq!(parsed["n_rows"], 1);
}

// =============================================================================
// Synthetic Data Tests
// =============================================================================

#[test]
fn test_synthetic_data_conforms_to_schema() {
    let schema_def: SchemaDefinition = serde_json::from_str(
        r#"{"columns": {"id": "int64", "score": "float64", "label": "string"}, "required": ["id", "score", "label"]}"#,
    )
    .unwrap();

    let table = generate_synthetic(&schema_def, 100, 42);
    let result = SchemaValidator.validate(&table, &schema_def);
    assert_eq!(result.status, Status::Pass);
}

#[test]
fn test_synthetic_roundtrip_through_csv() {
    let schema_def: SchemaDefinition = serde_json::from_str(
        r#"{"columns": {"id": "int64", "label": "string"}, "required": []}"#,
    )
    .unwrap();
    let table = generate_synthetic(&schema_def, 10, 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synthetic.csv");
    tabqa::write_csv(&table, &path).unwrap();

    let (loaded, _) = Loader::new().load_file(&path).unwrap();
    assert_eq!(loaded.headers, table.headers);
    assert_eq!(loaded.rows, table.rows);
}

// =============================================================================
// Load-Time Error Tests
// =============================================================================

#[test]
fn test_unsupported_format_rejected() {
    let data = create_test_file("not a table", ".parquet");
    let err = Loader::new().load_file(data.path()).unwrap_err();
    assert!(matches!(err, TabqaError::UnsupportedFormat(_)));
}

#[test]
fn test_malformed_rules_document_is_fatal() {
    let rules = create_test_file("rules:\n  - name: [broken\n", ".yml");
    assert!(RulesConfig::load(rules.path()).is_err());
}

#[test]
fn test_unknown_schema_type_tag_is_fatal() {
    let schema = create_test_file(r#"{"columns": {"x": "quaternion"}, "required": []}"#, ".json");
    assert!(matches!(
        SchemaDefinition::load(schema.path()),
        Err(TabqaError::Schema(_))
    ));
}

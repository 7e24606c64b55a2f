//! Validate command - check a dataset against a schema and rules.

use std::path::PathBuf;

use colored::Colorize;
use tabqa::{Loader, QaEngine, RulesConfig, SchemaDefinition, Status};

pub fn run(
    data: PathBuf,
    schema: PathBuf,
    rules: PathBuf,
    report: Option<PathBuf>,
    report_json: Option<PathBuf>,
    verbose: bool,
) -> Result<Status, Box<dyn std::error::Error>> {
    println!(
        "{} {}",
        "Validating".cyan().bold(),
        data.display().to_string().white()
    );

    let (table, source) = Loader::new().load_file(&data)?;
    let schema_def = SchemaDefinition::load(&schema)?;
    let rules_cfg = RulesConfig::load(&rules)?;

    println!(
        "Loaded {} rows x {} columns ({})",
        table.row_count().to_string().white().bold(),
        table.column_count().to_string().white().bold(),
        source.format
    );

    let engine = QaEngine::new();
    let outcome = engine.validate(&table, &schema_def, &rules_cfg)?;

    if outcome.schema.status.is_fail() {
        println!("{}", "Schema validation failed".red());
        for error in &outcome.schema.errors {
            println!("  {:?}", error);
        }
    } else {
        println!("{}", "Schema validation passed".green());
    }

    for rule in &outcome.rules {
        let status = match rule.status {
            Status::Pass => "pass".green(),
            Status::Fail => "fail".red(),
        };
        if verbose || rule.status.is_fail() {
            println!(
                "  {:30} {:16} {} ({} violations, {:.1}%)",
                rule.name,
                rule.kind,
                status,
                rule.n_violations,
                rule.fraction_violations * 100.0
            );
        }
    }

    if let Some(path) = &report_json {
        tabqa::write_json_report(path, &outcome, &rules_cfg.global)?;
        println!(
            "{} {}",
            "Wrote JSON report to".green(),
            path.display().to_string().white()
        );
    }
    if let Some(path) = &report {
        tabqa::write_html_report(path, &outcome, &rules_cfg.global)?;
        println!(
            "{} {}",
            "Wrote HTML report to".green(),
            path.display().to_string().white()
        );
    }

    let overall = outcome.overall_status();
    match overall {
        Status::Pass => println!("{}", "All checks passed!".green().bold()),
        Status::Fail => println!("{}", "Validation failed".red().bold()),
    }

    Ok(overall)
}

//! HTML report: a self-contained rendered document.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::engine::ValidationOutcome;
use crate::error::{Result, TabqaError};
use crate::rules::GlobalConfig;
use crate::schema::SchemaError;
use crate::status::Status;

/// Escape text for safe embedding in HTML.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn status_badge(status: Status) -> &'static str {
    match status {
        Status::Pass => r#"<span class="badge pass">pass</span>"#,
        Status::Fail => r#"<span class="badge fail">fail</span>"#,
    }
}

/// Render the full HTML report document.
pub fn render_html(outcome: &ValidationOutcome, global: &GlobalConfig) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<h1>Dataset QA report</h1>\n\
         <p>Overall: {} &middot; {} rows &middot; {} rules</p>\n",
        status_badge(outcome.overall_status()),
        outcome.n_rows,
        outcome.rules.len(),
    );

    let _ = write!(
        body,
        "<h2>Schema {}</h2>\n",
        status_badge(outcome.schema.status)
    );
    if outcome.schema.errors.is_empty() {
        body.push_str("<p>No schema errors.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>Error</th><th>Column</th><th>Expected</th><th>Actual</th></tr>\n");
        for error in &outcome.schema.errors {
            match error {
                SchemaError::MissingRequiredColumn { column } => {
                    let _ = write!(
                        body,
                        "<tr><td>missing_required_column</td><td>{}</td><td></td><td></td></tr>\n",
                        escape(column)
                    );
                }
                SchemaError::WrongDtype {
                    column,
                    expected,
                    actual,
                } => {
                    let _ = write!(
                        body,
                        "<tr><td>wrong_dtype</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                        escape(column),
                        escape(expected),
                        escape(actual)
                    );
                }
            }
        }
        body.push_str("</table>\n");
    }

    body.push_str("<h2>Rules</h2>\n");
    if outcome.rules.is_empty() {
        body.push_str("<p>No rules configured.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Name</th><th>Kind</th><th>Severity</th><th>Status</th>\
             <th>Violations</th><th>Fraction</th><th>Sample rows</th></tr>\n",
        );
        for rule in &outcome.rules {
            let sample: Vec<String> = rule
                .violation_rows
                .iter()
                .take(global.sample_violations)
                .map(|r| r.to_string())
                .collect();
            let _ = write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td>{}</td><td>{:.3}</td><td>{}</td></tr>\n",
                escape(&rule.name),
                escape(&rule.kind),
                escape(global.severity_for(&rule.kind)),
                status_badge(rule.status),
                rule.n_violations,
                rule.fraction_violations,
                sample.join(", "),
            );
        }
        body.push_str("</table>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Dataset QA report</title>\n<style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 0.3em 0.6em; text-align: left; }}\n\
         .badge {{ padding: 0.1em 0.5em; border-radius: 0.3em; color: #fff; }}\n\
         .badge.pass {{ background: #2a9d44; }}\n\
         .badge.fail {{ background: #c0392b; }}\n\
         </style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Write the HTML report, creating parent directories as needed.
pub fn write_html_report(
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

    let rendered = render_html(outcome, global);
    fs::write(path, rendered).map_err(|e| TabqaError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

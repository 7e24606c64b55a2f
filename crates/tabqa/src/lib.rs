//! tabqa: dataset labeling QA toolkit for tabular data.
//!
//! tabqa checks a tabular dataset against a structural schema and a list
//! of declarative quality rules, producing per-rule pass/fail verdicts
//! with violation counts.
//!
//! # Core principles
//!
//! - **Declarative**: schemas and rules are plain JSON/YAML documents
//! - **Read-only**: the dataset is never modified by validation
//! - **All-or-nothing dispatch**: configuration errors abort a run before
//!   any partial results are produced
//!
//! # Example
//!
//! ```no_run
//! use tabqa::{Loader, QaEngine, RulesConfig, SchemaDefinition, Status};
//!
//! let (table, _source) = Loader::new().load_file("reviews.csv").unwrap();
//! let schema = SchemaDefinition::load("schema.json").unwrap();
//! let rules = RulesConfig::load("rules.yml").unwrap();
//!
//! let outcome = QaEngine::new().validate(&table, &schema, &rules).unwrap();
//! assert_eq!(outcome.overall_status(), Status::Pass);
//! ```

pub mod engine;
pub mod error;
pub mod generate;
pub mod input;
pub mod report;
pub mod rules;
pub mod schema;
pub mod status;

pub use engine::{QaEngine, ValidationOutcome};
pub use error::{Result, TabqaError};
pub use generate::{generate_synthetic, write_csv};
pub use input::{DataTable, Loader, LoaderConfig, SourceMetadata};
pub use report::{build_report, render_html, write_html_report, write_json_report};
pub use rules::{GlobalConfig, RuleDefinition, RuleEvaluator, RuleRegistry, RuleResult, RulesConfig};
pub use schema::{SchemaDefinition, SchemaError, SchemaResult, SchemaValidator, TypeCategory};
pub use status::Status;

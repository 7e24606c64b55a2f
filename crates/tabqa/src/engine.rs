//! The validation engine: schema check + rule dispatch + aggregation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::DataTable;
use crate::rules::{RuleRegistry, RuleResult, RulesConfig};
use crate::schema::{SchemaDefinition, SchemaResult, SchemaValidator};
use crate::status::Status;

/// Combined result of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Structural schema check result.
    pub schema: SchemaResult,
    /// Rule results in rule declaration order.
    pub rules: Vec<RuleResult>,
    /// Row count of the validated dataset.
    pub n_rows: usize,
}

impl ValidationOutcome {
    /// Overall verdict: fail iff the schema failed or any rule failed.
    /// Order-independent by construction.
    pub fn overall_status(&self) -> Status {
        let any_fail =
            self.schema.status.is_fail() || self.rules.iter().any(|r| r.status.is_fail());
        Status::from_failed(any_fail)
    }
}

/// The QA engine. Owns a rule registry and a schema validator; the
/// dataset and configuration documents are read-only inputs per run.
pub struct QaEngine {
    registry: RuleRegistry,
    validator: SchemaValidator,
}

impl QaEngine {
    /// Create an engine with the built-in rule kinds.
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::builtin())
    }

    /// Create an engine with a custom registry.
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            validator: SchemaValidator,
        }
    }

    /// Mutable access to the registry, for registering additional kinds.
    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Run schema validation and all rules against a dataset.
    ///
    /// Rule dispatch is all-or-nothing: an unknown kind, invalid
    /// parameters, or a missing referenced column aborts the run with no
    /// partial results.
    pub fn validate(
        &self,
        table: &DataTable,
        schema: &SchemaDefinition,
        rules: &RulesConfig,
    ) -> Result<ValidationOutcome> {
        let schema_result = self.validator.validate(table, schema);
        let rule_results = self.registry.apply_rules(table, &rules.rules)?;

        Ok(ValidationOutcome {
            schema: schema_result,
            rules: rule_results,
            n_rows: table.row_count(),
        })
    }
}

impl Default for QaEngine {
    fn default() -> Self {
        Self::new()
    }
}

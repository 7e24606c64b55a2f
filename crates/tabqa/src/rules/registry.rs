//! Rule registry and dispatcher.

use std::collections::HashMap;

use super::config::RuleDefinition;
use super::evaluators::{
    AllowedValuesEvaluator, DuplicateRowsEvaluator, LengthRangeEvaluator, NullFractionEvaluator,
    NumericRangeEvaluator, RegexEvaluator, UniqueFractionEvaluator,
};
use super::result::RuleResult;
use crate::error::{Result, TabqaError};
use crate::input::DataTable;

/// Evaluates one rule kind against a dataset.
///
/// Implementations parse their own typed parameter struct from the rule's
/// raw parameter map, so new kinds can be registered without touching the
/// dispatcher.
pub trait RuleEvaluator {
    /// The kind identifier this evaluator handles.
    fn kind(&self) -> &'static str;

    /// Evaluate the rule against the full dataset.
    fn evaluate(&self, table: &DataTable, rule: &RuleDefinition) -> Result<RuleResult>;
}

/// Maps rule-kind identifiers to their evaluators.
///
/// A registry is an explicit per-engine value, not process-wide state.
/// `builtin()` covers the seven built-in kinds; `register` extends it.
pub struct RuleRegistry {
    evaluators: HashMap<&'static str, Box<dyn RuleEvaluator>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            evaluators: HashMap::new(),
        }
    }

    /// Create a registry with the seven built-in rule kinds.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(RegexEvaluator));
        registry.register(Box::new(NumericRangeEvaluator));
        registry.register(Box::new(AllowedValuesEvaluator));
        registry.register(Box::new(NullFractionEvaluator));
        registry.register(Box::new(UniqueFractionEvaluator));
        registry.register(Box::new(LengthRangeEvaluator));
        registry.register(Box::new(DuplicateRowsEvaluator));
        registry
    }

    /// Register an evaluator under its kind identifier, replacing any
    /// existing registration for that kind.
    pub fn register(&mut self, evaluator: Box<dyn RuleEvaluator>) {
        self.evaluators.insert(evaluator.kind(), evaluator);
    }

    /// Look up the evaluator for a kind.
    pub fn get(&self, kind: &str) -> Option<&dyn RuleEvaluator> {
        self.evaluators.get(kind).map(|e| e.as_ref())
    }

    /// Evaluate a rule list in declaration order, returning results
    /// position-correlated with the input.
    ///
    /// Every rule's kind is resolved before any evaluator runs, so an
    /// unknown kind aborts the whole batch with no partial results. Any
    /// evaluation error (missing column, invalid parameters) likewise
    /// aborts the batch.
    pub fn apply_rules(
        &self,
        table: &DataTable,
        rules: &[RuleDefinition],
    ) -> Result<Vec<RuleResult>> {
        let resolved: Vec<&dyn RuleEvaluator> = rules
            .iter()
            .map(|rule| {
                self.get(&rule.kind)
                    .ok_or_else(|| TabqaError::UnknownRuleKind(rule.kind.clone()))
            })
            .collect::<Result<_>>()?;

        resolved
            .iter()
            .zip(rules)
            .map(|(evaluator, rule)| evaluator.evaluate(table, rule))
            .collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

//! Declarative quality rules: configuration, evaluation, and results.

mod config;
mod evaluators;
mod registry;
mod result;

pub use config::{GlobalConfig, RuleDefinition, RulesConfig};
pub use evaluators::{
    AllowedValuesEvaluator, DuplicateRowsEvaluator, LengthRangeEvaluator, NullFractionEvaluator,
    NumericRangeEvaluator, RegexEvaluator, UniqueFractionEvaluator,
};
pub use registry::{RuleEvaluator, RuleRegistry};
pub use result::RuleResult;

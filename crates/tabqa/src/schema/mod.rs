//! Structural schema: column/type contract a dataset must satisfy
//! independent of rule checks.

mod definition;
mod validator;

pub use definition::{SchemaDefinition, TypeCategory};
pub use validator::{SchemaError, SchemaResult, SchemaValidator};

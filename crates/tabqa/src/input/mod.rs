//! Dataset loading and the in-memory table abstraction.

mod parser;
mod source;

pub use parser::{Loader, LoaderConfig};
pub use source::{DataTable, SourceMetadata};

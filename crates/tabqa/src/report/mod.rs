//! Report generation: JSON and HTML renderings of a validation outcome.

mod html;
mod json;

pub use html::{render_html, write_html_report};
pub use json::{build_report, write_json_report};

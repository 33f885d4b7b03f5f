//! Export of assembled documents.
//!
//! - **json**: one tagged JSON object per line, or a pretty array of rules
//! - **yara**: rule source re-emitted from the verbatim bodies

pub mod common;
pub mod json;
pub mod yara;

pub use common::{ensure_parent_dir, write_to_file};
pub use json::{write_json_array, write_json_lines};
pub use yara::{render_ruleset, write_yara};

#![deny(unsafe_code)]

pub mod aliases;
pub mod error;
pub mod paths;

pub use crate::aliases::AliasTable;
pub use crate::error::StandardsError;
pub use crate::paths::{ALIAS_FILENAME, STANDARDS_ENV_VAR, default_alias_path, standards_root};

/// Load the alias table from the default standards location.
pub fn load_default_alias_table() -> Result<AliasTable, StandardsError> {
    AliasTable::load(&default_alias_path())
}

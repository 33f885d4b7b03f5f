//! Standards directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "YARDEX_STANDARDS_DIR";

/// File name of the metadata alias resource inside the standards directory.
pub const ALIAS_FILENAME: &str = "meta_aliases.csv";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `YARDEX_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Path of the default metadata alias resource.
pub fn default_alias_path() -> PathBuf {
    standards_root().join(ALIAS_FILENAME)
}

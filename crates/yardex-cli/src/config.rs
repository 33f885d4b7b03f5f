//! Configuration file loading.
//!
//! Settings come from an optional TOML file with a `[yardex]` table:
//!
//! ```toml
//! [yardex]
//! aliases = "standards/meta_aliases.csv"
//! extensions = ["yar", "yara"]
//! export_dir = "output"
//! ```
//!
//! The file is looked up from `--config`, then `YARDEX_CONFIG`, then
//! `yardex.toml` in the working directory. Command line flags override it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use yardex_ingest::DEFAULT_EXTENSIONS;

pub const CONFIG_ENV_VAR: &str = "YARDEX_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "yardex.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Alias table resource; the bundled table when unset.
    pub aliases: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aliases: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            export_dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    yardex: Settings,
}

/// Config file to read, if any. The working-directory default is only
/// returned when it exists.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env::var_os(CONFIG_ENV_VAR)
        && !value.is_empty()
    {
        return Some(PathBuf::from(value));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.is_file().then_some(default)
}

/// Load settings, falling back to defaults when no config file applies.
///
/// # Errors
///
/// A config file that was named explicitly but is missing, or any config
/// file that fails to parse, is an error.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    match config_path(explicit) {
        Some(path) => read_settings(&path),
        None => {
            tracing::debug!("no config file, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Read settings from a TOML file.
pub fn read_settings(path: &Path) -> Result<Settings> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let file: ConfigFile =
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(file.yardex)
}

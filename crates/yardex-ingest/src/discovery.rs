//! Rule file discovery.

use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// Extensions recognized when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["yar", "yara"];

/// Whether `path` carries one of `extensions` (case-insensitive, leading dot optional).
pub fn is_rule_file<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| ext.eq_ignore_ascii_case(wanted.as_ref().trim_start_matches('.')))
        })
}

/// Lists rule files in a directory, optionally descending into sub-directories.
///
/// Returns files sorted by path.
pub fn list_rule_files<S: AsRef<str>>(
    dir: &Path,
    recursive: bool,
    extensions: &[S],
) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    collect_rule_files(dir, recursive, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_rule_files<S: AsRef<str>>(
    dir: &Path,
    recursive: bool,
    extensions: &[S],
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    // Symlinked directories are not followed.
    for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        if path.is_file() && is_rule_file(path, extensions) {
            trace!(path = %path.display(), "found rule file");
            files.push(entry.into_path());
        }
    }
    Ok(())
}

/// Expand a command-line input into rule files.
///
/// A directory is listed with [`list_rule_files`]; a file is taken as-is
/// whatever its extension.
pub fn resolve_inputs<S: AsRef<str>>(
    path: &Path,
    recursive: bool,
    extensions: &[S],
) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        list_rule_files(path, recursive, extensions)
    } else if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

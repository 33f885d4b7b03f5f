//! Metadata key alias table.
//!
//! Rule authors spell metadata keys in dozens of ways (`desc`, `Description`,
//! `date_created`, `md5_hash`, ...). The alias table maps raw key prefixes to a
//! fixed canonical vocabulary.
//!
//! # Resource format
//!
//! One entry per line, either `alias` (maps to itself) or `alias,canonical`.
//! An empty canonical (`alias,`) keeps a key that matches the alias exactly
//! as typed. Blank lines and `#` comment lines are skipped. No quoting.
//!
//! # Resolution
//!
//! Matching is by prefix, not exact lookup: every entry whose prefix starts
//! the lower-cased raw key is a candidate, and the candidate with the longest
//! *canonical* string wins. Entries are scanned in prefix order, so on equal
//! canonical length the lexicographically smallest prefix wins.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, trace};

use crate::error::StandardsError;

/// Immutable prefix-to-canonical mapping.
///
/// Built once at start-up and shared by reference; resolution never mutates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    /// Load an alias table from a resource file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains a line with
    /// more than two fields.
    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let file = File::open(path).map_err(|e| StandardsError::io(path, e))?;
        let table = Self::from_reader(file, path)?;
        debug!(path = %path.display(), entries = table.len(), "loaded alias table");
        Ok(table)
    }

    /// Parse an alias table from any reader. `source` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self, StandardsError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(reader);

        let mut entries = BTreeMap::new();
        for record in reader.records() {
            let record = record.map_err(|e| StandardsError::Csv {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;
            let line = record.position().map_or(0, csv::Position::line);
            let invalid = |message: &str| StandardsError::InvalidAlias {
                path: source.to_path_buf(),
                line,
                message: message.to_string(),
            };

            let (alias, canonical) = match record.len() {
                0 => continue,
                1 => {
                    let alias = record.get(0).unwrap_or("");
                    (alias, alias)
                }
                2 => (record.get(0).unwrap_or(""), record.get(1).unwrap_or("")),
                n => return Err(invalid(&format!("expected 1 or 2 fields, found {n}"))),
            };
            if alias.is_empty() {
                if canonical.is_empty() {
                    continue;
                }
                return Err(invalid("empty alias"));
            }

            let alias = alias.to_lowercase();
            if let Some(previous) = entries.insert(alias.clone(), canonical.to_string()) {
                debug!(alias = %alias, previous = %previous, canonical, "alias redefined");
            }
        }
        Ok(Self { entries })
    }

    /// Build a table from `(alias, canonical)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(alias, canonical)| (alias.as_ref().to_lowercase(), canonical.into()))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(alias, canonical)` entries in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }

    /// Resolve a raw metadata key to its canonical name.
    ///
    /// Unmatched keys come back lower-cased but otherwise unchanged.
    pub fn resolve(&self, raw_key: &str) -> String {
        let key = raw_key.to_lowercase();
        let mut best: Option<&str> = None;
        for (prefix, canonical) in &self.entries {
            if !key.starts_with(prefix.as_str()) {
                continue;
            }
            if canonical.is_empty() {
                if key == *prefix {
                    return key;
                }
                continue;
            }
            if best.is_none_or(|current| canonical.len() > current.len()) {
                best = Some(canonical);
            }
        }
        match best {
            Some(canonical) => {
                if canonical != key {
                    trace!(from_name = %key, to_name = canonical, "metadata key mapped");
                }
                canonical.to_string()
            }
            None => key,
        }
    }

    /// Distinct canonical field names. A keep-as-is entry names itself.
    pub fn canonical_fields(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .map(|(alias, canonical)| {
                if canonical.is_empty() {
                    alias.as_str()
                } else {
                    canonical.as_str()
                }
            })
            .collect()
    }

    /// Aliases declared for a canonical field, in prefix order.
    pub fn aliases_for(&self, canonical: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(alias, target)| {
                target.as_str() == canonical || (target.is_empty() && alias.as_str() == canonical)
            })
            .map(|(alias, _)| alias.as_str())
            .collect()
    }
}

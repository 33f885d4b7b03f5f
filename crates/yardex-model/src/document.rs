//! Canonical, search-ready documents.
//!
//! One [`RulesetDocument`] is produced per rule file and one [`RuleDocument`]
//! per rule. Both are immutable once assembled and serialize with camelCase
//! field names.

use serde::{Deserialize, Serialize};

use crate::ids::RuleId;
use crate::metadata::MetadataMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDocument {
    pub identifier: RuleId,
    pub global: bool,
    pub private: bool,
    pub ruleset_name: String,
    pub rule_name: String,
    /// Lower-case tokens split out of the rule name.
    pub name_tags: Vec<String>,
    /// Tags written by the rule author, verbatim and in source order.
    pub author_tags: Vec<String>,
    /// Reserved for later curation; always empty at assembly.
    pub user_tags: Vec<String>,
    pub metadata: MetadataMap,
    pub body: String,
}

impl RuleDocument {
    /// Values recorded for a canonical metadata field.
    pub fn metadata_values(&self, field: &str) -> &[String] {
        self.metadata.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesetDocument {
    /// Source path or name the ruleset was read from.
    pub identifier: String,
    pub tags: Vec<String>,
    pub imports: Vec<String>,
    pub includes: Vec<String>,
}

//! Parsed rule-language structures.
//!
//! These are what the parser hands to the document assembler. Values are kept
//! exactly as the author wrote them; normalization happens later.

use serde::{Deserialize, Serialize};

/// One `key = value` statement from a rule's `meta:` section.
///
/// The value is already stringified: strings are unescaped, integers are
/// decimal, booleans are `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetaEntry {
    pub key: String,
    pub value: String,
}

impl RawMetaEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single parsed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRule {
    pub identifier: String,
    pub global: bool,
    pub private: bool,
    /// Tags written after the rule name (`rule x : tag1 tag2`).
    pub tags: Vec<String>,
    pub meta: Vec<RawMetaEntry>,
    /// Verbatim source text of the rule, modifiers through closing brace.
    pub body: String,
}

/// A parsed rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRuleset {
    pub imports: Vec<String>,
    pub includes: Vec<String>,
    pub rules: Vec<ParsedRule>,
}

impl ParsedRuleset {
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

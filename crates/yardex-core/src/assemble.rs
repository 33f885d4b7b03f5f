//! Canonical document assembly.

use std::path::{Component, Path};

use tracing::trace;
use yardex_model::{ParsedRule, ParsedRuleset, RuleDocument, RuleId, RulesetDocument};
use yardex_normalization::{MetadataNormalizer, split_rule_name};
use yardex_standards::AliasTable;

/// Builds canonical documents from parsed rules.
///
/// Holds only a shared reference to the alias table, so one assembler (or
/// many) can be used from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct DocumentAssembler<'a> {
    metadata: MetadataNormalizer<'a>,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self {
            metadata: MetadataNormalizer::new(aliases),
        }
    }

    pub fn assemble_rule(&self, ruleset_name: &str, rule: &ParsedRule) -> RuleDocument {
        let document = RuleDocument {
            identifier: RuleId::derive(ruleset_name, &rule.identifier),
            global: rule.global,
            private: rule.private,
            ruleset_name: ruleset_name.to_string(),
            rule_name: rule.identifier.clone(),
            name_tags: split_rule_name(&rule.identifier),
            author_tags: rule.tags.clone(),
            user_tags: Vec::new(),
            metadata: self.metadata.normalize(&rule.meta),
            body: rule.body.clone(),
        };
        trace!(
            ruleset = ruleset_name,
            rule = %document.rule_name,
            id = %document.identifier,
            fields = document.metadata.len(),
            "assembled rule document"
        );
        document
    }

    pub fn assemble_ruleset(
        &self,
        ruleset_name: &str,
        ruleset: &ParsedRuleset,
    ) -> RulesetDocument {
        RulesetDocument {
            identifier: ruleset_name.to_string(),
            tags: ruleset_tags(ruleset_name),
            imports: ruleset.imports.clone(),
            includes: ruleset.includes.clone(),
        }
    }
}

/// Lower-cased directory segments of a ruleset path.
///
/// The final segment (the file itself) is not a tag, so a bare file name
/// yields nothing. Root, `.` and `..` components are skipped.
pub fn ruleset_tags(ruleset_name: &str) -> Vec<String> {
    let mut segments: Vec<String> = Path::new(ruleset_name)
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().to_lowercase()),
            _ => None,
        })
        .collect();
    segments.pop();
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_from_directories() {
        assert_eq!(ruleset_tags("rules/APT/loader.yar"), ["rules", "apt"]);
        assert_eq!(ruleset_tags("/srv/rules/loader.yar"), ["srv", "rules"]);
        assert_eq!(ruleset_tags("./rules/../x/loader.yar"), ["rules", "x"]);
    }

    #[test]
    fn single_segment_has_no_tags() {
        assert!(ruleset_tags("loader.yar").is_empty());
        assert!(ruleset_tags("").is_empty());
        assert!(ruleset_tags("/").is_empty());
    }
}

//! Searchable document fields.

use yardex_model::RuleDocument;
use yardex_standards::AliasTable;

/// Document-level fields that can be searched besides metadata.
pub const DOCUMENT_FIELDS: &[&str] = &[
    "authorTags",
    "nameTags",
    "ruleName",
    "rulesetName",
    "userTags",
];

/// Values a rule carries for a searchable field.
///
/// Document-level names are matched exactly; anything else is treated as a
/// metadata key and resolved through the alias table first.
pub fn field_values<'a>(
    rule: &'a RuleDocument,
    field: &str,
    aliases: &AliasTable,
) -> Vec<&'a str> {
    match field {
        "nameTags" => rule.name_tags.iter().map(String::as_str).collect(),
        "authorTags" => rule.author_tags.iter().map(String::as_str).collect(),
        "userTags" => rule.user_tags.iter().map(String::as_str).collect(),
        "ruleName" => vec![rule.rule_name.as_str()],
        "rulesetName" => vec![rule.ruleset_name.as_str()],
        other => rule
            .metadata_values(&aliases.resolve(other))
            .iter()
            .map(String::as_str)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yardex_model::{MetadataMap, RuleId};

    fn rule() -> RuleDocument {
        let mut metadata = MetadataMap::new();
        metadata.insert("description".to_string(), vec!["loader".to_string()]);
        RuleDocument {
            identifier: RuleId::derive("a.yar", "Mal_Loader"),
            global: false,
            private: false,
            ruleset_name: "a.yar".to_string(),
            rule_name: "Mal_Loader".to_string(),
            name_tags: vec!["mal".to_string(), "loader".to_string()],
            author_tags: vec!["apt".to_string()],
            user_tags: vec![],
            metadata,
            body: String::new(),
        }
    }

    #[test]
    fn document_and_metadata_fields() {
        let aliases = AliasTable::from_pairs([("desc", "description")]);
        let rule = rule();
        assert_eq!(field_values(&rule, "nameTags", &aliases), ["mal", "loader"]);
        assert_eq!(field_values(&rule, "authorTags", &aliases), ["apt"]);
        assert_eq!(field_values(&rule, "rulesetName", &aliases), ["a.yar"]);
        assert_eq!(field_values(&rule, "ruleName", &aliases), ["Mal_Loader"]);
        assert_eq!(field_values(&rule, "description", &aliases), ["loader"]);
        assert_eq!(field_values(&rule, "desc", &aliases), ["loader"]);
        assert!(field_values(&rule, "hash", &aliases).is_empty());
    }
}

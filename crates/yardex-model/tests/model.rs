//! Tests for yardex-model types.

use yardex_model::{
    MetadataMap, RuleDocument, RuleId, RulesetDocument, is_date_field,
};

fn sample_rule() -> RuleDocument {
    let mut metadata = MetadataMap::new();
    metadata.insert("author".to_string(), vec!["analyst".to_string()]);
    metadata.insert(
        "creation_date".to_string(),
        vec!["2020-01-01".to_string()],
    );
    RuleDocument {
        identifier: RuleId::derive("apt.yar", "Trojan_APIHook_Win32"),
        global: false,
        private: true,
        ruleset_name: "apt.yar".to_string(),
        rule_name: "Trojan_APIHook_Win32".to_string(),
        name_tags: vec!["trojan".to_string(), "api".to_string()],
        author_tags: vec!["malware".to_string()],
        user_tags: vec![],
        metadata,
        body: "rule Trojan_APIHook_Win32 { condition: true }".to_string(),
    }
}

#[test]
fn rule_document_uses_camel_case_field_names() {
    let json = serde_json::to_value(sample_rule()).expect("serialize rule");
    let object = json.as_object().expect("object");
    for field in [
        "identifier",
        "global",
        "private",
        "rulesetName",
        "ruleName",
        "nameTags",
        "authorTags",
        "userTags",
        "metadata",
        "body",
    ] {
        assert!(object.contains_key(field), "missing field {field}");
    }
    assert_eq!(object.len(), 10);
    assert_eq!(
        object["identifier"],
        serde_json::Value::String(RuleId::derive("apt.yar", "Trojan_APIHook_Win32").to_hex())
    );
}

#[test]
fn rule_document_round_trips() {
    let rule = sample_rule();
    let json = serde_json::to_string(&rule).expect("serialize rule");
    let back: RuleDocument = serde_json::from_str(&json).expect("deserialize rule");
    assert_eq!(back, rule);
}

#[test]
fn rule_document_rejects_bad_identifier() {
    let mut json = serde_json::to_value(sample_rule()).expect("serialize rule");
    json["identifier"] = serde_json::Value::String("not-hex".to_string());
    assert!(serde_json::from_value::<RuleDocument>(json).is_err());
}

#[test]
fn metadata_values_defaults_to_empty() {
    let rule = sample_rule();
    assert_eq!(rule.metadata_values("author"), ["analyst".to_string()]);
    assert!(rule.metadata_values("hash").is_empty());
}

#[test]
fn ruleset_document_field_names() {
    let doc = RulesetDocument {
        identifier: "rules/apt/apt.yar".to_string(),
        tags: vec!["rules".to_string(), "apt".to_string()],
        imports: vec!["pe".to_string()],
        includes: vec![],
    };
    let json = serde_json::to_value(&doc).expect("serialize ruleset");
    assert_eq!(json["identifier"], "rules/apt/apt.yar");
    assert_eq!(json["imports"][0], "pe");
    assert!(json["includes"].as_array().unwrap().is_empty());
}

#[test]
fn date_fields_are_recognized() {
    assert!(is_date_field("creation_date"));
    assert!(is_date_field("last_modified"));
    assert!(is_date_field("release_date"));
    assert!(!is_date_field("date"));
    assert!(!is_date_field("author"));
}

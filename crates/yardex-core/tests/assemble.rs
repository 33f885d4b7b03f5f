//! End-to-end assembly tests.

use std::fs;

use yardex_core::{DocumentAssembler, process_files, process_source};
use yardex_model::{ParsedRule, ParsedRuleset, RawMetaEntry, RuleId};
use yardex_standards::{AliasTable, load_default_alias_table};

fn aliases() -> AliasTable {
    load_default_alias_table().expect("load default aliases")
}

fn sample_rule() -> ParsedRule {
    ParsedRule {
        identifier: "Trojan_APIHook_Win32".to_string(),
        global: false,
        private: true,
        tags: vec!["malware".to_string()],
        meta: vec![
            RawMetaEntry::new("date", "01 Jan 2020"),
            RawMetaEntry::new("Author", "analyst"),
            RawMetaEntry::new("creation_date", "never"),
        ],
        body: "private rule Trojan_APIHook_Win32 : malware { condition: true }".to_string(),
    }
}

#[test]
fn assembles_rule_document() {
    let aliases = aliases();
    let assembler = DocumentAssembler::new(&aliases);
    let rule = sample_rule();

    let doc = assembler.assemble_rule("apt.yar", &rule);
    assert_eq!(doc.identifier, RuleId::derive("apt.yar", "Trojan_APIHook_Win32"));
    assert_eq!(doc.name_tags, ["trojan", "api", "hook", "win32"]);
    assert_eq!(doc.author_tags, ["malware"]);
    assert!(doc.user_tags.is_empty());
    assert!(doc.private);
    assert!(!doc.global);
    assert_eq!(doc.ruleset_name, "apt.yar");
    assert_eq!(doc.rule_name, "Trojan_APIHook_Win32");
    assert_eq!(doc.metadata_values("creation_date"), ["2020-01-01"]);
    assert_eq!(doc.metadata_values("author"), ["analyst"]);
    assert_eq!(doc.body, rule.body);
}

#[test]
fn identifier_is_deterministic_and_scoped_to_ruleset() {
    let aliases = aliases();
    let assembler = DocumentAssembler::new(&aliases);
    let rule = sample_rule();

    let first = assembler.assemble_rule("apt.yar", &rule);
    let again = assembler.assemble_rule("apt.yar", &rule);
    let elsewhere = assembler.assemble_rule("other.yar", &rule);
    assert_eq!(first.identifier, again.identifier);
    assert_ne!(first.identifier, elsewhere.identifier);
}

#[test]
fn assembles_ruleset_document() {
    let aliases = aliases();
    let assembler = DocumentAssembler::new(&aliases);
    let parsed = ParsedRuleset {
        imports: vec!["pe".to_string()],
        includes: vec!["common.yar".to_string()],
        rules: vec![sample_rule()],
    };

    let doc = assembler.assemble_ruleset("rules/Windows/apt.yar", &parsed);
    assert_eq!(doc.identifier, "rules/Windows/apt.yar");
    assert_eq!(doc.tags, ["rules", "windows"]);
    assert_eq!(doc.imports, ["pe"]);
    assert_eq!(doc.includes, ["common.yar"]);

    let doc = assembler.assemble_ruleset("apt.yar", &parsed);
    assert!(doc.tags.is_empty());
}

#[test]
fn processes_source_in_file_order() {
    let source = r#"
import "pe"
rule First_Rule { meta: desc = "one" condition: true }
rule SecondRule { meta: md5 = "abc" sha1 = "def" condition: false }
"#;
    let docs = process_source(&aliases(), "set.yar", source).expect("process source");
    assert_eq!(docs.ruleset.imports, ["pe"]);
    let names: Vec<&str> = docs.rules.iter().map(|r| r.rule_name.as_str()).collect();
    assert_eq!(names, ["First_Rule", "SecondRule"]);
    assert_eq!(docs.rules[0].metadata_values("description"), ["one"]);
    assert_eq!(docs.rules[1].metadata_values("hash"), ["abc", "def"]);
}

#[test]
fn batch_continues_past_failures() {
    let dir = tempfile::tempdir().expect("temp dir");
    let good = dir.path().join("good.yar");
    let bad = dir.path().join("bad.yar");
    let missing = dir.path().join("missing.yar");
    fs::write(&good, "rule Good { condition: true }\n").expect("write good");
    fs::write(&bad, "rule Bad {\n").expect("write bad");

    let result = process_files(&aliases(), &[bad.clone(), good.clone(), missing.clone()]);
    assert_eq!(result.documents.len(), 1);
    assert_eq!(result.rule_count(), 1);
    assert_eq!(
        result.documents[0].ruleset.identifier,
        good.to_string_lossy()
    );
    let failed: Vec<_> = result.failures.iter().map(|f| f.path.clone()).collect();
    assert_eq!(failed, [bad, missing]);
    assert!(result.has_failures());
}

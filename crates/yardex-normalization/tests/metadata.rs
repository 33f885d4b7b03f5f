use yardex_model::RawMetaEntry;
use yardex_normalization::{MetadataNormalizer, normalize_metadata};
use yardex_standards::load_default_alias_table;

#[test]
fn normalizes_against_default_aliases() {
    let aliases = load_default_alias_table().expect("load default aliases");
    let entries = [
        RawMetaEntry::new("Author", "Florian"),
        RawMetaEntry::new("desc", "Detects a loader"),
        RawMetaEntry::new("date", "01 Jan 2020"),
        RawMetaEntry::new("md5", "d41d8cd98f00b204e9800998ecf8427e"),
        RawMetaEntry::new("sha256", "e3b0c44298fc1c149afbf4c8996fb924"),
        RawMetaEntry::new("ref_hash", "abc"),
    ];
    let map = normalize_metadata(&entries, &aliases);

    assert_eq!(map["author"], ["Florian"]);
    assert_eq!(map["description"], ["Detects a loader"]);
    assert_eq!(map["creation_date"], ["2020-01-01"]);
    assert_eq!(
        map["hash"],
        [
            "d41d8cd98f00b204e9800998ecf8427e",
            "e3b0c44298fc1c149afbf4c8996fb924",
            "abc"
        ]
    );
    assert!(!map.contains_key("ref_hash"));
    assert!(!map.contains_key("desc"));
}

#[test]
fn unparseable_creation_date_is_dropped() {
    let aliases = load_default_alias_table().expect("load default aliases");
    let normalizer = MetadataNormalizer::new(&aliases);

    let map = normalizer.normalize(&[RawMetaEntry::new("creation_date", "never")]);
    assert!(map.get("creation_date").is_none());

    let map = normalizer.normalize(&[
        RawMetaEntry::new("creation_date", "never"),
        RawMetaEntry::new("creation_date", "2021-03-05"),
    ]);
    assert_eq!(map["creation_date"], ["2021-03-05"]);
}

#[test]
fn keys_are_always_canonical_or_lower_case() {
    let aliases = load_default_alias_table().expect("load default aliases");
    let entries = [
        RawMetaEntry::new("THREAT_ACTOR", "x"),
        RawMetaEntry::new("Custom_Field", "y"),
    ];
    let map = normalize_metadata(&entries, &aliases);
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["actor", "custom_field"]);
}

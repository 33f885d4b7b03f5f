//! Metadata key and value normalization.

use tracing::{debug, trace};
use yardex_model::{MetadataMap, RawMetaEntry, is_date_field};
use yardex_standards::AliasTable;

use crate::datetime::normalize_date;

/// Converts raw `key = value` metadata into a canonical multi-valued map.
///
/// Keys are resolved through the alias table. Values of date fields are
/// normalized to `YYYY-MM-DD`; a date value that cannot be read is dropped
/// without creating its key.
#[derive(Debug, Clone, Copy)]
pub struct MetadataNormalizer<'a> {
    aliases: &'a AliasTable,
}

impl<'a> MetadataNormalizer<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    pub fn normalize(&self, entries: &[RawMetaEntry]) -> MetadataMap {
        let mut metadata = MetadataMap::new();
        for entry in entries {
            let key = self.aliases.resolve(&entry.key.to_lowercase());
            if is_date_field(&key) {
                let Some(date) = normalize_date(&entry.value) else {
                    debug!(
                        key = %entry.key,
                        field = %key,
                        value = %entry.value,
                        "dropping unparseable date"
                    );
                    continue;
                };
                if date != entry.value {
                    trace!(field = %key, from = %entry.value, to = %date, "date normalized");
                }
                metadata.entry(key).or_default().push(date);
            } else {
                metadata.entry(key).or_default().push(entry.value.clone());
            }
        }
        metadata
    }
}

/// Normalize metadata entries against an alias table.
pub fn normalize_metadata(entries: &[RawMetaEntry], aliases: &AliasTable) -> MetadataMap {
    MetadataNormalizer::new(aliases).normalize(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AliasTable {
        AliasTable::from_pairs([
            ("author", "author"),
            ("desc", "description"),
            ("date", "creation_date"),
            ("creation_date", "creation_date"),
            ("modified", "last_modified"),
        ])
    }

    #[test]
    fn keys_are_resolved_and_values_kept() {
        let entries = [
            RawMetaEntry::new("Author", "Jane Doe"),
            RawMetaEntry::new("desc", "Detects a loader"),
        ];
        let map = normalize_metadata(&entries, &table());
        assert_eq!(map["author"], ["Jane Doe"]);
        assert_eq!(map["description"], ["Detects a loader"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn date_values_are_normalized() {
        let entries = [
            RawMetaEntry::new("date", "March 5, 2021"),
            RawMetaEntry::new("modified", "2021-03-05T10:22:00Z"),
        ];
        let map = normalize_metadata(&entries, &table());
        assert_eq!(map["creation_date"], ["2021-03-05"]);
        assert_eq!(map["last_modified"], ["2021-03-05"]);
    }

    #[test]
    fn unparseable_date_creates_no_key() {
        let entries = [RawMetaEntry::new("creation_date", "never")];
        let map = normalize_metadata(&entries, &table());
        assert!(!map.contains_key("creation_date"));
        assert!(map.is_empty());
    }

    #[test]
    fn duplicates_keep_encounter_order() {
        let entries = [
            RawMetaEntry::new("author", "b"),
            RawMetaEntry::new("AUTHOR", "a"),
            RawMetaEntry::new("author", "b"),
        ];
        let map = normalize_metadata(&entries, &table());
        assert_eq!(map["author"], ["b", "a", "b"]);
    }

    #[test]
    fn unknown_keys_pass_through_lower_cased() {
        let entries = [RawMetaEntry::new("Yara_Quality", "high")];
        let map = normalize_metadata(&entries, &table());
        assert_eq!(map["yara_quality"], ["high"]);
    }
}

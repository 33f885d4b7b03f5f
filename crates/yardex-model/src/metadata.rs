//! Canonical metadata map and the date-typed canonical fields.

use std::collections::BTreeMap;

/// Canonical field name to values, in encounter order, duplicates kept.
pub type MetadataMap = BTreeMap<String, Vec<String>>;

pub const CREATION_DATE: &str = "creation_date";
pub const LAST_MODIFIED: &str = "last_modified";
pub const RELEASE_DATE: &str = "release_date";

/// Canonical fields whose values are rewritten as ISO dates.
pub const DATE_FIELDS: [&str; 3] = [CREATION_DATE, LAST_MODIFIED, RELEASE_DATE];

pub fn is_date_field(canonical: &str) -> bool {
    DATE_FIELDS.contains(&canonical)
}

pub mod document;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod ruleset;

pub use document::{RuleDocument, RulesetDocument};
pub use error::ModelError;
pub use ids::RuleId;
pub use metadata::{
    CREATION_DATE, DATE_FIELDS, LAST_MODIFIED, MetadataMap, RELEASE_DATE, is_date_field,
};
pub use ruleset::{ParsedRule, ParsedRuleset, RawMetaEntry};

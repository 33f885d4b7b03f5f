//! Normalization of free-form rule metadata.
//!
//! - **datetime**: ad hoc date strings to ISO calendar dates
//! - **tokenizer**: rule identifiers to lower-case search tags
//! - **metadata**: raw `meta:` entries to the canonical multi-valued map

pub mod datetime;
pub mod metadata;
pub mod tokenizer;

pub use datetime::{normalize_date, parse_calendar_date, rewrite_date};
pub use metadata::{MetadataNormalizer, normalize_metadata};
pub use tokenizer::split_rule_name;

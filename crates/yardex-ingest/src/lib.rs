//! Rule ingestion.
//!
//! Locates rule files on disk and parses YARA source into the structures
//! the document assembler consumes.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use yardex_ingest::{DEFAULT_EXTENSIONS, list_rule_files, parse_ruleset_file};
//!
//! for path in list_rule_files(Path::new("rules"), true, DEFAULT_EXTENSIONS)? {
//!     let ruleset = parse_ruleset_file(&path)?;
//!     println!("{}: {} rules", path.display(), ruleset.rule_count());
//! }
//! ```

mod discovery;
mod error;
mod keywords;
mod lexer;
mod parser;

// === Error Types ===
pub use error::{IngestError, ParseError, Result};

// === File Discovery ===
pub use discovery::{DEFAULT_EXTENSIONS, is_rule_file, list_rule_files, resolve_inputs};

// === Parsing ===
pub use keywords::{KEYWORDS, is_keyword};
pub use parser::{parse_ruleset, parse_ruleset_file};

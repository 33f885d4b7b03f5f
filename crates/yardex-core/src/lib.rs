pub mod assemble;
pub mod pipeline;

pub use assemble::{DocumentAssembler, ruleset_tags};
pub use pipeline::{
    BatchResult, FileFailure, RulesetDocuments, process_file, process_files, process_source,
};

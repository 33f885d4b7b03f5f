//! Rule file processing pipeline.
//!
//! Each file is parsed, then assembled into one ruleset document followed by
//! one rule document per rule, in file order. Files are independent: a
//! failure in one is recorded and the batch moves on.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};
use yardex_ingest::{IngestError, ParseError, parse_ruleset, parse_ruleset_file};
use yardex_model::{ParsedRuleset, RuleDocument, RulesetDocument};
use yardex_standards::AliasTable;

use crate::assemble::DocumentAssembler;

/// Documents produced from one rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesetDocuments {
    pub ruleset: RulesetDocument,
    pub rules: Vec<RuleDocument>,
}

/// A rule file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: IngestError,
}

#[derive(Debug, Default)]
pub struct BatchResult {
    pub documents: Vec<RulesetDocuments>,
    pub failures: Vec<FileFailure>,
}

impl BatchResult {
    pub fn rule_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.rules.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// All rule documents across the batch, in file order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleDocument> {
        self.documents.iter().flat_map(|doc| doc.rules.iter())
    }
}

fn assemble(
    assembler: &DocumentAssembler<'_>,
    ruleset_name: &str,
    parsed: &ParsedRuleset,
) -> RulesetDocuments {
    RulesetDocuments {
        ruleset: assembler.assemble_ruleset(ruleset_name, parsed),
        rules: parsed
            .rules
            .iter()
            .map(|rule| assembler.assemble_rule(ruleset_name, rule))
            .collect(),
    }
}

/// Parse and assemble rule source text.
pub fn process_source(
    aliases: &AliasTable,
    ruleset_name: &str,
    source: &str,
) -> Result<RulesetDocuments, ParseError> {
    let parsed = parse_ruleset(source)?;
    Ok(assemble(
        &DocumentAssembler::new(aliases),
        ruleset_name,
        &parsed,
    ))
}

/// Read, parse and assemble one rule file. The ruleset name is the path as given.
pub fn process_file(aliases: &AliasTable, path: &Path) -> Result<RulesetDocuments, IngestError> {
    let parsed = parse_ruleset_file(path)?;
    let ruleset_name = path.to_string_lossy();
    Ok(assemble(
        &DocumentAssembler::new(aliases),
        &ruleset_name,
        &parsed,
    ))
}

/// Process rule files one after another, collecting failures.
pub fn process_files(aliases: &AliasTable, paths: &[PathBuf]) -> BatchResult {
    let span = info_span!("process_files", file_count = paths.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut result = BatchResult::default();
    for path in paths {
        match process_file(aliases, path) {
            Ok(documents) => {
                debug!(
                    path = %path.display(),
                    rules = documents.rules.len(),
                    "processed rule file"
                );
                result.documents.push(documents);
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "skipping rule file");
                result.failures.push(FileFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    info!(
        files = result.documents.len(),
        rules = result.rule_count(),
        failures = result.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "processing complete"
    );
    result
}

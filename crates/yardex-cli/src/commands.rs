use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use yardex_cli::config::Settings;
use yardex_cli::fields::{DOCUMENT_FIELDS, field_values};
use yardex_core::{BatchResult, process_files};
use yardex_ingest::resolve_inputs;
use yardex_output::{write_json_array, write_json_lines, write_to_file, write_yara};
use yardex_standards::{AliasTable, load_default_alias_table};

use crate::cli::{ExportArgs, ExportFormatArg, ImportArgs, InputArgs, ValuesArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{ExportResult, FailedFile, ImportResult};

pub const DOCUMENTS_FILE: &str = "documents.jsonl";

/// Resolved settings and the loaded alias table.
pub struct Session {
    pub settings: Settings,
    pub aliases: AliasTable,
}

impl Session {
    /// Load the alias table named on the command line, in the config, or bundled.
    pub fn load(settings: Settings, aliases_override: Option<&Path>) -> Result<Self> {
        let aliases = match aliases_override.or(settings.aliases.as_deref()) {
            Some(path) => AliasTable::load(path)
                .with_context(|| format!("load alias table {}", path.display()))?,
            None => load_default_alias_table().context("load bundled alias table")?,
        };
        Ok(Self { settings, aliases })
    }

    fn collect(&self, input: &InputArgs) -> Result<BatchResult> {
        let extensions = input
            .extensions
            .as_deref()
            .unwrap_or(&self.settings.extensions);
        let paths = resolve_inputs(&input.path, input.recursive, extensions)
            .with_context(|| format!("read rules from {}", input.path.display()))?;
        Ok(process_files(&self.aliases, &paths))
    }
}

fn failed_files(batch: &BatchResult) -> Vec<FailedFile> {
    batch
        .failures
        .iter()
        .map(|failure| FailedFile {
            path: failure.path.clone(),
            error: failure.error.to_string(),
        })
        .collect()
}

pub fn run_import(session: &Session, args: &ImportArgs) -> Result<ImportResult> {
    let span = info_span!("import", path = %args.input.path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let batch = session.collect(&args.input)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| session.settings.export_dir.join(DOCUMENTS_FILE));
    write_to_file(&output, |writer| write_json_lines(writer, &batch.documents))?;

    info!(
        output = %output.display(),
        rulesets = batch.documents.len(),
        rules = batch.rule_count(),
        duration_ms = start.elapsed().as_millis(),
        "import complete"
    );
    Ok(ImportResult {
        output,
        files: batch.documents.len() + batch.failures.len(),
        rulesets: batch.documents.len(),
        rules: batch.rule_count(),
        failures: failed_files(&batch),
    })
}

pub fn run_export(session: &Session, args: &ExportArgs) -> Result<ExportResult> {
    let batch = session.collect(&args.input)?;
    let write = |writer: &mut dyn Write| -> Result<()> {
        match args.format {
            ExportFormatArg::Yara => write_yara(writer, &batch.documents),
            ExportFormatArg::Json => write_json_array(writer, batch.rules()),
        }
    };
    match &args.output {
        Some(path) => write_to_file(path, |writer| write(writer))?,
        None => {
            let mut stdout = io::stdout().lock();
            write(&mut stdout)?;
            stdout.flush().context("flush stdout")?;
        }
    }
    Ok(ExportResult {
        rules: batch.rule_count(),
        failures: failed_files(&batch),
    })
}

pub fn run_fields(aliases: &AliasTable) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Aliases")]);
    apply_table_style(&mut table);
    for field in aliases.canonical_fields() {
        let others: Vec<&str> = aliases
            .aliases_for(field)
            .into_iter()
            .filter(|alias| *alias != field)
            .collect();
        table.add_row(vec![field.to_string(), others.join(", ")]);
    }
    println!("{table}");

    let mut documents = Table::new();
    documents.set_header(vec![header_cell("Document field")]);
    apply_table_style(&mut documents);
    for field in DOCUMENT_FIELDS {
        documents.add_row(vec![*field]);
    }
    println!("{documents}");
    Ok(())
}

pub fn run_values(session: &Session, args: &ValuesArgs) -> Result<Vec<FailedFile>> {
    let batch = session.collect(&args.input)?;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rule in batch.rules() {
        for value in field_values(rule, &args.field, &session.aliases) {
            *counts.entry(value).or_default() += 1;
        }
    }
    let mut ordered: Vec<(&str, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_header(vec![header_cell(&args.field), header_cell("Rules")]);
    apply_table_style(&mut table);
    for (value, count) in ordered {
        table.add_row(vec![value.to_string(), count.to_string()]);
    }
    println!("{table}");
    Ok(failed_files(&batch))
}

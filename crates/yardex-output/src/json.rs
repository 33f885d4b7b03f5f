//! JSON export.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use yardex_core::RulesetDocuments;
use yardex_model::{RuleDocument, RulesetDocument};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Record<'a> {
    Ruleset(&'a RulesetDocument),
    Rule(&'a RuleDocument),
}

/// Write each ruleset document followed by its rule documents, one JSON
/// object per line.
pub fn write_json_lines<W: Write + ?Sized>(
    writer: &mut W,
    documents: &[RulesetDocuments],
) -> Result<()> {
    for docs in documents {
        write_record(writer, &Record::Ruleset(&docs.ruleset))?;
        for rule in &docs.rules {
            write_record(writer, &Record::Rule(rule))?;
        }
    }
    Ok(())
}

fn write_record<W: Write + ?Sized>(writer: &mut W, record: &Record<'_>) -> Result<()> {
    serde_json::to_writer(&mut *writer, record).context("serialize document")?;
    writer.write_all(b"\n").context("write document")?;
    Ok(())
}

/// Write rule documents as a pretty-printed JSON array.
pub fn write_json_array<'a, W, I>(writer: &mut W, rules: I) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a RuleDocument>,
{
    let rules: Vec<&RuleDocument> = rules.into_iter().collect();
    serde_json::to_writer_pretty(&mut *writer, &rules).context("serialize rules")?;
    writer.write_all(b"\n").context("write rules")?;
    Ok(())
}

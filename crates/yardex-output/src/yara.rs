//! YARA source re-emission.
//!
//! Rule bodies are copied verbatim; only `import` and `include` lines are
//! regenerated.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use yardex_core::RulesetDocuments;

/// Render one ruleset as YARA source.
pub fn render_ruleset(docs: &RulesetDocuments) -> String {
    let mut out = String::new();
    for module in &docs.ruleset.imports {
        let _ = writeln!(out, "import \"{}\"", escape(module));
    }
    for path in &docs.ruleset.includes {
        let _ = writeln!(out, "include \"{}\"", escape(path));
    }
    for (index, rule) in docs.rules.iter().enumerate() {
        if index > 0 || !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&rule.body);
        out.push('\n');
    }
    out
}

/// Write every ruleset, separated by blank lines.
pub fn write_yara<W: Write + ?Sized>(
    writer: &mut W,
    documents: &[RulesetDocuments],
) -> Result<()> {
    for (index, docs) in documents.iter().enumerate() {
        if index > 0 {
            writer.write_all(b"\n").context("write yara")?;
        }
        writer
            .write_all(render_ruleset(docs).as_bytes())
            .context("write yara")?;
    }
    Ok(())
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

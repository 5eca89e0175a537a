use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::LedgerRow;

const HEADER: &str = "Component,Origin,License,Copyright";

/// Append rows to the CSV ledger, creating it with a header when absent.
///
/// Rows are written in the order produced upstream; nothing is sorted and
/// nothing is deduplicated against pre-existing rows (re-running a tool
/// appends again — an accepted limitation of the ledger format). An empty
/// batch performs no file operation at all.
///
/// Returns the number of rows written.
pub fn append(path: &Path, rows: &[LedgerRow]) -> Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }

    let exists = path.exists();
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open ledger {}", path.display()))?;

    if !exists {
        writeln!(file, "{}", HEADER)?;
    }

    for row in rows {
        writeln!(
            file,
            "{},{},{},{}",
            field(&row.component),
            field(&row.origin),
            field(&row.license),
            field(&row.copyright)
        )?;
    }

    Ok(rows.len())
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
/// Unmapped license names like `Apache License, Version 2.0` need this.
fn field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

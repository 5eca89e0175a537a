use std::path::Path;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::models::LedgerRow;

/// Print the run summary for a batch of appended rows.
///
/// The count line always prints; `verbose` adds a table of the rows,
/// `quiet` suppresses everything but the count line.
pub fn render(rows: &[LedgerRow], ledger_path: &Path, verbose: bool, quiet: bool) {
    if verbose && !quiet && !rows.is_empty() {
        render_table(rows);
    }

    println!(
        "Added {} packages to {}",
        rows.len().to_string().green().bold(),
        ledger_path.display()
    );

    if !quiet {
        let unresolved = rows.iter().filter(|r| r.license.is_empty()).count();
        if unresolved > 0 {
            eprintln!(
                "  {} {} packages without a resolved license — review the ledger",
                "⚠".yellow(),
                unresolved
            );
        }
    }
}

fn render_table(rows: &[LedgerRow]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Component").add_attribute(Attribute::Bold),
            Cell::new("Origin").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
        ]);

    for row in rows {
        let license = if row.license.is_empty() {
            Cell::new("unresolved").fg(comfy_table::Color::Yellow)
        } else {
            Cell::new(&row.license)
        };
        table.add_row(vec![
            Cell::new(&row.component),
            Cell::new(&row.origin),
            license,
        ]);
    }

    println!("{}", table);
}

//! CSV export collaborator: renders a transaction snapshot as delimited text.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::transaction::Transaction;
use crate::errors::Result;
use crate::utils::format_date;

const DELIMITER: u8 = b';';

/// Writes transactions as semicolon-delimited CSV, oldest first.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at).then(a.id.cmp(&b.id)));

    let mut out = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);
    out.write_record(["ID", "Date", "Kind", "Category", "Description", "Amount"])?;
    for txn in rows {
        out.write_record([
            txn.id.to_string(),
            format_date(txn.occurred_at),
            txn.kind.to_string(),
            txn.category.clone(),
            txn.description.clone(),
            format!("{:.2}", txn.amount),
        ])?;
    }
    out.flush().map_err(crate::errors::TrackerError::from)?;
    Ok(())
}

/// Writes transactions to a CSV file at `path`.
pub fn export_csv(transactions: &[Transaction], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(transactions, file)
}

//! CSV export for dispatch decision records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::DecisionRecord;

/// Column header for the decision CSV export.
const HEADER: &str = "index,price,demand,production,decision,sold,hoarded,excess,stored_energy";

/// Exports decision records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per interval. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[DecisionRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes decision records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[DecisionRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            r.index.to_string(),
            format!("{:.4}", r.price),
            format!("{:.4}", r.demand),
            format!("{:.4}", r.production),
            r.decision.label().to_string(),
            format!("{:.4}", r.sold),
            format!("{:.4}", r.hoarded),
            format!("{:.4}", r.excess),
            format!("{:.4}", r.stored_after),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

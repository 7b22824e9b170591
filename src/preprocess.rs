//! Reducing a domain ranking file to the single column the batch reads.

use log::{debug, info};
use std::path::Path;

use crate::core::constants::columns;
use crate::core::{AuditError, Result};
use crate::progress::ProgressReporter;

/// Copy the `Domain` column of the CSV at `ranking` into a new CSV at `out`.
///
/// Row order is preserved, since output indices are positions in this file.
/// Cells are copied as raw bytes. Returns the number of records written.
pub fn extract_domains(
    ranking: &Path,
    out: &Path,
    mut progress: Option<&mut ProgressReporter>,
) -> Result<u64> {
    info!(
        "Reading from {} and writing to {}...",
        ranking.display(),
        out.display()
    );

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(ranking)?;
    let column = reader
        .headers()?
        .iter()
        .position(|h| h == columns::DOMAIN)
        .ok_or_else(|| AuditError::MissingColumn {
            path: ranking.display().to_string(),
            column: columns::DOMAIN.to_string(),
        })?;
    debug!("Found '{}' at column {column}", columns::DOMAIN);

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(out)?;
    writer.write_record([columns::DOMAIN])?;

    if let Some(p) = progress.as_deref_mut() {
        p.start_record_copy();
    }

    let mut num_records = 0;
    let mut record = csv::ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        writer.write_record([record.get(column).unwrap_or(b"")])?;
        num_records += 1;
        if let Some(p) = progress.as_deref() {
            p.record_done();
        }
    }
    writer.flush()?;

    if let Some(p) = progress.as_deref() {
        p.finish_record_copy(num_records);
    }

    info!("Wrote {num_records} records to {}", out.display());
    Ok(num_records)
}

use std::fs;
use std::path::Path;

use crate::core::constants::columns;
use crate::core::{AuditError, Result};

/// Where a run starts. Derived from the last row of the existing output and
/// never stored anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumeState {
    pub next_index: u64,
}

impl ResumeState {
    pub fn fresh() -> Self {
        Self::default()
    }

    pub fn is_fresh(&self) -> bool {
        self.next_index == 0
    }

    /// Whether the domain at `index` was handled by an earlier run.
    pub fn is_done(&self, index: u64) -> bool {
        index < self.next_index
    }
}

/// Compute the resume state from the output at `output`.
///
/// A missing, empty or header-only output starts from index 0. Otherwise the
/// run continues right after the index in the last row. An output whose last
/// row cannot be read back is an error: carrying on could skip or repeat
/// domains.
pub fn resolve(output: &Path) -> Result<ResumeState> {
    let metadata = match fs::metadata(output) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ResumeState::fresh());
        }
        Err(err) => return Err(err.into()),
    };
    if metadata.len() == 0 {
        return Ok(ResumeState::fresh());
    }

    let corrupt = |reason: String| AuditError::CorruptResumeState {
        path: output.display().to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(output)?;

    let index_column = reader
        .headers()?
        .iter()
        .position(|h| h == columns::INDEX)
        .ok_or_else(|| corrupt(format!("header has no '{}' column", columns::INDEX)))?;

    let mut last_row = None;
    for record in reader.records() {
        match record {
            Ok(record) => last_row = Some(record),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => return Err(corrupt(format!("unreadable row ({err})"))),
        }
    }

    let Some(last_row) = last_row else {
        return Ok(ResumeState::fresh());
    };

    let cell = last_row.get(index_column).unwrap_or("").trim();
    if cell.is_empty() {
        return Err(corrupt("last row has no index".to_string()));
    }
    let last_index: u64 = cell
        .parse()
        .map_err(|_| corrupt(format!("index '{cell}' is not an integer")))?;

    Ok(ResumeState {
        next_index: last_index + 1,
    })
}

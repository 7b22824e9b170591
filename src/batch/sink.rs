use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::constants::{columns, fields};
use crate::core::{AuditError, DomainResult, Result};

/// Append-only writer of one output row per processed domain.
///
/// Each row is rendered in full before a single write, then flushed and
/// synced, so a killed process leaves either the whole row or none of it.
#[derive(Debug)]
pub struct ResultSink {
    file: File,
    path: PathBuf,
    last_index: Option<u64>,
    rows_written: u64,
}

impl ResultSink {
    /// Open `path` for appending, creating it if needed. The header is
    /// written when the file is new or empty.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_fresh = file.metadata()?.len() == 0;

        let mut sink = Self {
            file,
            path: path.to_path_buf(),
            last_index: None,
            rows_written: 0,
        };
        if is_fresh {
            sink.write_line(columns::OUTPUT_HEADER)?;
        }
        Ok(sink)
    }

    /// Append the row for `result`. Indices must strictly increase.
    pub fn emit(&mut self, result: &DomainResult) -> Result<()> {
        if let Some(last) = self.last_index
            && result.index <= last
        {
            return Err(AuditError::InvalidArgument(format!(
                "row {} emitted after row {last} in {}",
                result.index,
                self.path.display()
            )));
        }

        self.write_line(render_row(result))?;
        self.last_index = Some(result.index);
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(cells)?;
        let line = writer
            .into_inner()
            .map_err(|e| AuditError::Io(e.into_error()))?;

        self.file.write_all(&line)?;
        self.file.flush()?;
        self.file.sync_data()?;
        Ok(())
    }
}

/// Output cells for `result`: index, site, then each captured field with its
/// values joined by a space, or empty when absent.
pub fn render_row(result: &DomainResult) -> Vec<String> {
    let mut row = Vec::with_capacity(columns::OUTPUT_HEADER.len());
    row.push(result.index.to_string());
    row.push(result.site.clone());
    for field in fields::INTERESTING {
        row.push(result.fields.joined(field).unwrap_or_default());
    }
    row
}

//! CSV file sink for streamed result sets

use crate::error::{ExtractError, ExtractResult};
use ixe_db::{Row, RowSink, SinkError};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Header and row count of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Column names taken from the first row, in result-set order
    pub header: Vec<String>,

    /// Data rows written (the header is not counted)
    pub rows: u64,
}

/// Writes rows to a CSV data file.
///
/// The header is written just before the first row, from that row's column
/// names. A result set without rows leaves the file empty.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<BufWriter<File>>,
    header: Option<Vec<String>>,
    rows: u64,
}

impl CsvSink {
    /// Create the data file, truncating whatever an earlier attempt or run
    /// left there
    pub fn create(path: &Path) -> ExtractResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ExtractError::output(parent, e))?;
        }
        let file = File::create(path).map_err(|e| ExtractError::output(path, e))?;
        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(BufWriter::new(file));

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            header: None,
            rows: 0,
        })
    }

    /// Path of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush the file and report what was written
    pub fn finish(mut self) -> ExtractResult<ExportResult> {
        self.writer
            .flush()
            .map_err(|e| ExtractError::output(&self.path, e))?;
        Ok(ExportResult {
            header: self.header.unwrap_or_default(),
            rows: self.rows,
        })
    }

    /// Drop a partial file so it can never be mistaken for output
    pub fn discard(self) -> ExtractResult<()> {
        let Self { path, writer, .. } = self;
        drop(writer);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ExtractError::output(&path, e)),
        }
    }
}

impl RowSink for CsvSink {
    fn accept(&mut self, row: Row<'_>) -> Result<(), SinkError> {
        if self.header.is_none() {
            self.writer
                .write_record(row.columns())
                .map_err(SinkError::new)?;
            self.header = Some(row.columns().to_vec());
        }
        self.writer
            .write_record(row.values().iter().map(|v| v.as_deref().unwrap_or("")))
            .map_err(SinkError::new)?;
        self.rows += 1;
        Ok(())
    }
}

//! The row-stream contract every output format implements.

use crate::error::EmitError;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use synth_core::Row;

/// Default buffer size for file output.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Output file format.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One CSV file per table, with a header row
    #[default]
    Csv,
    /// One pretty-printed JSON array per table
    Json,
    /// One INSERT statement per row
    Sql,
}

impl OutputFormat {
    /// File extension of the format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Sql => "sql",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Path of the file for `table` in `dir`: `{dir}/{table}.{ext}`.
pub fn table_path(dir: &Path, table: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{table}.{}", format.extension()))
}

/// An open output file for one table.
pub trait TableSink {
    /// Append one row.
    fn write_row(&mut self, row: &Row) -> Result<(), EmitError>;

    /// Bytes handed to the file so far.
    fn bytes_written(&self) -> u64;

    /// Flush and close the file, returning the final size in bytes.
    fn finish(self: Box<Self>) -> Result<u64, EmitError>;
}

/// A family of table sinks for one output format.
pub trait RowEmitter: Send + Sync {
    fn format(&self) -> OutputFormat;

    /// Create `{dir}/{table}.{ext}` and return a sink writing to it.
    fn begin_table(&self, dir: &Path, table: &str) -> Result<Box<dyn TableSink>, EmitError>;

    /// Write a whole row stream to `{dir}/{table}.{ext}`.
    fn emit(
        &self,
        dir: &Path,
        table: &str,
        rows: &mut dyn Iterator<Item = Row>,
    ) -> Result<u64, EmitError> {
        let mut sink = self.begin_table(dir, table)?;
        for row in rows {
            sink.write_row(&row)?;
        }
        sink.finish()
    }
}

/// Create the buffered file for a table.
pub fn create_table_file(
    dir: &Path,
    table: &str,
    format: OutputFormat,
) -> Result<CountingWriter<BufWriter<File>>, EmitError> {
    let file = File::create(table_path(dir, table, format))?;
    Ok(CountingWriter::new(BufWriter::with_capacity(
        DEFAULT_BUFFER_SIZE,
        file,
    )))
}

/// Writer adapter that counts the bytes passing through it.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Metrics from writing one table.
#[derive(Debug, Clone, Default)]
pub struct TableMetrics {
    /// Table name.
    pub table: String,
    /// Number of rows written.
    pub rows_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent writing data.
    pub write_duration: Duration,
    /// Output file size in bytes (0 when the table was not written).
    pub file_size_bytes: u64,
}

impl TableMetrics {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.file_size_bytes as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

//! CSV table sink.

use crate::value::CsvValue;
use csv::Writer;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use synth_core::Row;
use synth_emit::{
    create_table_file, CountingWriter, EmitError, OutputFormat, RowEmitter, TableSink,
};
use tracing::debug;

/// Emitter writing one CSV file per table.
///
/// The header is the column order of the first row. Later rows are written
/// in header order; a column missing from a row becomes an empty field and a
/// column absent from the first row is dropped.
#[derive(Debug, Clone)]
pub struct CsvEmitter {
    include_header: bool,
}

impl Default for CsvEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvEmitter {
    pub fn new() -> Self {
        Self {
            include_header: true,
        }
    }

    /// Set whether to include a header row in the CSV output.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }
}

impl RowEmitter for CsvEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn begin_table(&self, dir: &Path, table: &str) -> Result<Box<dyn TableSink>, EmitError> {
        let out = create_table_file(dir, table, OutputFormat::Csv)?;
        Ok(Box::new(CsvTableSink {
            table: table.to_string(),
            writer: Writer::from_writer(out),
            header: None,
            include_header: self.include_header,
            rows_written: 0,
        }))
    }
}

/// Open CSV file for one table.
pub struct CsvTableSink {
    table: String,
    writer: Writer<CountingWriter<BufWriter<File>>>,
    header: Option<Vec<String>>,
    include_header: bool,
    rows_written: u64,
}

/// Fields of `row` in `header` order.
pub fn row_to_csv_record(row: &Row, header: &[String]) -> Vec<String> {
    header
        .iter()
        .map(|column| {
            row.get(column)
                .map(|v| CsvValue::from(v).into_inner())
                .unwrap_or_default()
        })
        .collect()
}

impl TableSink for CsvTableSink {
    fn write_row(&mut self, row: &Row) -> Result<(), EmitError> {
        if self.header.is_none() {
            let header: Vec<String> = row.columns().map(str::to_string).collect();
            if self.include_header {
                self.writer.write_record(&header)?;
            }
            self.header = Some(header);
        }
        let header = self.header.as_deref().unwrap_or_default();
        self.writer.write_record(row_to_csv_record(row, header))?;

        self.rows_written += 1;
        if self.rows_written % 10000 == 0 {
            debug!("{}: written {} rows", self.table, self.rows_written);
        }
        Ok(())
    }

    fn bytes_written(&self) -> u64 {
        self.writer.get_ref().count()
    }

    fn finish(self: Box<Self>) -> Result<u64, EmitError> {
        let mut writer = self.writer;
        writer.flush()?;
        let inner = writer
            .into_inner()
            .map_err(|e| EmitError::Io(std::io::Error::other(e.to_string())))?;
        Ok(inner.count())
    }
}

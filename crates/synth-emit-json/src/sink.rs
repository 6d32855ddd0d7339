//! JSON table sink.

use crate::value::row_to_pretty_json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use synth_core::Row;
use synth_emit::{
    create_table_file, CountingWriter, EmitError, OutputFormat, RowEmitter, TableSink,
};
use tracing::debug;

/// Emitter writing one pretty-printed JSON array of row objects per table.
#[derive(Debug, Clone, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl RowEmitter for JsonEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn begin_table(&self, dir: &Path, table: &str) -> Result<Box<dyn TableSink>, EmitError> {
        let writer = create_table_file(dir, table, OutputFormat::Json)?;
        Ok(Box::new(JsonTableSink {
            table: table.to_string(),
            writer,
            rows_written: 0,
        }))
    }
}

/// Open JSON file for one table. Rows are streamed as array elements.
pub struct JsonTableSink {
    table: String,
    writer: CountingWriter<BufWriter<File>>,
    rows_written: u64,
}

impl TableSink for JsonTableSink {
    fn write_row(&mut self, row: &Row) -> Result<(), EmitError> {
        let separator = if self.rows_written == 0 { "[\n  " } else { ",\n  " };
        let object = row_to_pretty_json(row, 1)?;
        self.writer.write_all(separator.as_bytes())?;
        self.writer.write_all(object.as_bytes())?;

        self.rows_written += 1;
        if self.rows_written % 10000 == 0 {
            debug!("{}: written {} rows", self.table, self.rows_written);
        }
        Ok(())
    }

    fn bytes_written(&self) -> u64 {
        self.writer.count()
    }

    fn finish(self: Box<Self>) -> Result<u64, EmitError> {
        let closing = if self.rows_written == 0 { "[]\n" } else { "\n]\n" };
        let mut writer = self.writer;
        writer.write_all(closing.as_bytes())?;
        writer.flush()?;
        Ok(writer.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::Value;
    use tempfile::TempDir;

    #[test]
    fn test_emit_json_array() {
        let temp_dir = TempDir::new().unwrap();
        let rows = vec![
            Row::new().with("id", 1).with("name", "Ada"),
            Row::new().with("id", 2).with("name", Value::Null),
        ];
        let size = JsonEmitter::new()
            .emit(temp_dir.path(), "people", &mut rows.into_iter())
            .unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join("people.json")).unwrap();
        assert_eq!(size, content.len() as u64);
        assert!(content.starts_with("[\n  {\n    \"id\": 1,"));

        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "Ada");
        assert!(items[1]["name"].is_null());
    }

    #[test]
    fn test_empty_table_is_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        JsonEmitter::new()
            .emit(temp_dir.path(), "none", &mut std::iter::empty())
            .unwrap();
        let content = std::fs::read_to_string(temp_dir.path().join("none.json")).unwrap();
        assert_eq!(content, "[]\n");
    }
}

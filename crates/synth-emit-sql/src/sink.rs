//! SQL INSERT table sink.

use crate::value::{quote_ident, SqlLiteral};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use synth_core::Row;
use synth_emit::{
    create_table_file, CountingWriter, EmitError, OutputFormat, RowEmitter, TableSink,
};
use tracing::debug;

/// Emitter writing one `INSERT` statement per row.
#[derive(Debug, Clone, Default)]
pub struct SqlEmitter;

impl SqlEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl RowEmitter for SqlEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Sql
    }

    fn begin_table(&self, dir: &Path, table: &str) -> Result<Box<dyn TableSink>, EmitError> {
        let writer = create_table_file(dir, table, OutputFormat::Sql)?;
        Ok(Box::new(SqlTableSink {
            table: table.to_string(),
            writer,
            rows_written: 0,
        }))
    }
}

/// Generate the INSERT statement for one row.
pub fn to_insert(table: &str, row: &Row) -> String {
    let columns: Vec<String> = row.columns().map(quote_ident).collect();
    let values: Vec<String> = row
        .iter()
        .map(|(_, v)| SqlLiteral::from(v).into_inner())
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        quote_ident(table),
        columns.join(", "),
        values.join(", ")
    )
}

/// Open SQL file for one table.
pub struct SqlTableSink {
    table: String,
    writer: CountingWriter<BufWriter<File>>,
    rows_written: u64,
}

impl TableSink for SqlTableSink {
    fn write_row(&mut self, row: &Row) -> Result<(), EmitError> {
        writeln!(self.writer, "{}", to_insert(&self.table, row))?;

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
        let mut writer = self.writer;
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
    fn test_to_insert() {
        let row = Row::new()
            .with("id", 1)
            .with("name", "O'Hara")
            .with("note", Value::Null);
        assert_eq!(
            to_insert("users", &row),
            r#"INSERT INTO "users" ("id", "name", "note") VALUES (1, 'O''Hara', NULL);"#
        );
    }

    #[test]
    fn test_emit_sql() {
        let temp_dir = TempDir::new().unwrap();
        let rows = vec![Row::new().with("id", 1), Row::new().with("id", 2)];
        let size = SqlEmitter::new()
            .emit(temp_dir.path(), "t", &mut rows.into_iter())
            .unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join("t.sql")).unwrap();
        assert_eq!(size, content.len() as u64);
        assert_eq!(
            content,
            "INSERT INTO \"t\" (\"id\") VALUES (1);\nINSERT INTO \"t\" (\"id\") VALUES (2);\n"
        );
    }
}

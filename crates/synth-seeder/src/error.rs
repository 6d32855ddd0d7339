//! Error types for seeder runs.

use std::path::PathBuf;
use synth_core::{ErrorKind, SchemaError};
use synth_emit::EmitError;
use synth_generator::GenerateError;
use thiserror::Error;

/// Errors that abort a seeder run.
///
/// Row-level variants carry the `(table, column, row)` the failure is
/// attributed to; `row` is the zero-based row index within the table.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Schema failed structural validation or has a circular dependency.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A column's generator or parameters were rejected before any row was
    /// generated.
    #[error("Column '{table}.{column}': {source}")]
    InvalidColumn {
        table: String,
        column: String,
        #[source]
        source: GenerateError,
    },

    /// A foreign-key column found no generated values in its parent.
    #[error("No values generated for {target}, referenced by '{table}.{column}' (row {row})")]
    MissingReference {
        table: String,
        column: String,
        row: u64,
        target: String,
    },

    /// A producer failed for one cell.
    #[error("Generation failed for '{table}.{column}' (row {row}): {source}")]
    Generation {
        table: String,
        column: String,
        row: u64,
        #[source]
        source: GenerateError,
    },

    /// The run was cancelled between rows.
    #[error("Cancelled while generating '{table}' after {rows} rows")]
    Cancelled { table: String, rows: u64 },

    /// The output directory could not be created.
    #[error("Failed to create output directory '{}': {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sink failed to write a table file.
    #[error("Failed to write '{table}': {source}")]
    Emit {
        table: String,
        #[source]
        source: EmitError,
    },

    /// Total output exceeded the configured byte limit.
    #[error("Output limit of {limit} bytes exceeded while writing '{table}'")]
    OutputLimit { table: String, limit: u64 },
}

impl SeedError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeedError::Schema(e) => e.kind(),
            SeedError::InvalidColumn { source, .. } => source.kind(),
            SeedError::MissingReference { .. } => ErrorKind::MissingReference,
            SeedError::Generation { source, .. } => source.kind(),
            SeedError::Cancelled { .. } => ErrorKind::Cancelled,
            SeedError::OutputDir { .. } | SeedError::OutputLimit { .. } => ErrorKind::Io,
            SeedError::Emit { source, .. } => source.kind(),
        }
    }

    /// Structured location of the failure, e.g. `orders.user_id[3]`.
    pub fn location(&self) -> Option<String> {
        match self {
            SeedError::InvalidColumn { table, column, .. } => Some(format!("{table}.{column}")),
            SeedError::MissingReference {
                table, column, row, ..
            }
            | SeedError::Generation {
                table, column, row, ..
            } => Some(format!("{table}.{column}[{row}]")),
            SeedError::Cancelled { table, .. }
            | SeedError::Emit { table, .. }
            | SeedError::OutputLimit { table, .. } => Some(table.clone()),
            SeedError::OutputDir { path, .. } => Some(path.display().to_string()),
            SeedError::Schema(_) => None,
        }
    }

    pub(crate) fn emit(table: &str, source: EmitError) -> Self {
        SeedError::Emit {
            table: table.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let cycle = SeedError::from(SchemaError::CircularDependency {
            cycle: "a -> b -> a".to_string(),
        });
        assert_eq!(cycle.kind(), ErrorKind::Schema);
        assert_eq!(cycle.location(), None);

        let missing = SeedError::MissingReference {
            table: "orders".to_string(),
            column: "user_id".to_string(),
            row: 0,
            target: "users.id".to_string(),
        };
        assert_eq!(missing.kind(), ErrorKind::MissingReference);
        assert_eq!(missing.kind().exit_code(), 2);
        assert_eq!(missing.location().as_deref(), Some("orders.user_id[0]"));

        let cancelled = SeedError::Cancelled {
            table: "users".to_string(),
            rows: 10,
        };
        assert_eq!(cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(cancelled.kind().exit_code(), 1);
    }

    #[test]
    fn test_generation_keeps_source_kind() {
        let err = SeedError::Generation {
            table: "t".to_string(),
            column: "c".to_string(),
            row: 2,
            source: GenerateError::NotFound {
                industry: "base".to_string(),
                name: "nope".to_string(),
            },
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("row 2"));
    }
}

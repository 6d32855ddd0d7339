//! Common types for synthgen output sinks.
//!
//! This crate provides the contract shared by the CSV, JSON and SQL sinks
//! (`synth-emit-*`), the shared CLI arguments and per-table metrics.
//!
//! A sink writes `{table}.{ext}` under an output directory, one row at a
//! time, so a seeder run never holds a whole table in memory.

pub mod args;
mod error;
mod sink;

pub use args::CommonSeedArgs;
pub use error::EmitError;
pub use sink::{
    create_table_file, table_path, CountingWriter, OutputFormat, RowEmitter, TableMetrics,
    TableSink, DEFAULT_BUFFER_SIZE,
};

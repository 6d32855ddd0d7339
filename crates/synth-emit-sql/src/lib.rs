//! SQL INSERT output sink for synthgen.
//!
//! Each row becomes `INSERT INTO "table" ("col", ...) VALUES (...);`.
//! Identifiers are double-quoted and string literals single-quoted with
//! embedded quotes doubled, so the files load into Postgres and SQLite as-is.

mod sink;
pub mod value;

pub use sink::{to_insert, SqlEmitter, SqlTableSink};
pub use value::{quote_ident, quote_string, SqlLiteral};

//! CSV output sink for synthgen.
//!
//! # Example
//!
//! ```ignore
//! use synth_emit::RowEmitter;
//! use synth_emit_csv::CsvEmitter;
//!
//! let emitter = CsvEmitter::new();
//! let bytes = emitter.emit(Path::new("out"), "users", &mut rows.into_iter())?;
//! ```

mod sink;
pub mod value;

pub use sink::{row_to_csv_record, CsvEmitter, CsvTableSink};
pub use value::CsvValue;

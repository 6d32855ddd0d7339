//! JSON output sink for synthgen.
//!
//! Each table becomes a pretty-printed JSON array of row objects whose keys
//! follow the row's column order.

mod sink;
pub mod value;

pub use sink::{JsonEmitter, JsonTableSink};
pub use value::{row_to_pretty_json, JsonValue};

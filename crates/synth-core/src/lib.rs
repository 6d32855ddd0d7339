//! Core types for the synthgen data generation engine.
//!
//! This crate provides the foundational types shared by the generator,
//! the relational seeder and the output emitters:
//!
//! - [`Value`] - Dynamically-typed datum produced by a generator
//! - [`Row`] - Ordered column → value mapping
//! - [`ParameterDef`] / [`GeneratorInfo`] / [`ParamSchema`] - Parameter
//!   declaration, coercion and validation
//! - [`Schema`] - Tables, columns and foreign keys loaded from YAML
//! - [`ReferenceMemo`] / [`ForeignOverrides`] - Previously generated key values
//!
//! # Architecture
//!
//! ```text
//! synth-core (this crate)
//!    │
//!    ├─── synth-generator  (registry + generation kernel)
//!    │
//!    ├─── synth-seeder     (FK-ordered table generation)
//!    │
//!    └─── synth-emit       (CSV / JSON / SQL sinks)
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::{ParamType, ParameterDef, GeneratorInfo, ParamSchema, Value};
//! use std::collections::BTreeMap;
//!
//! let mut schema = ParamSchema::new();
//! schema
//!     .register(
//!         GeneratorInfo::new("base", "number", "Random integer")
//!             .param(ParameterDef::new("min", ParamType::Int).default_value(Value::Int(0)))
//!             .param(ParameterDef::new("max", ParamType::Int).default_value(Value::Int(100))),
//!     )
//!     .unwrap();
//!
//! let mut raw = BTreeMap::new();
//! raw.insert("max".to_string(), Value::String("10".to_string()));
//! let params = schema.coerce_and_validate("base", "number", &raw).unwrap();
//! assert_eq!(params.get("max"), Some(&Value::Int(10)));
//! assert_eq!(params.get("min"), Some(&Value::Int(0)));
//! ```

pub mod error;
pub mod params;
pub mod refs;
pub mod schema;
pub mod values;

// Re-exports for convenience
pub use error::ErrorKind;
pub use params::{
    coerce, transform_parameters, GeneratorInfo, ParamError, ParamMap, ParamSchema, ParamType,
    ParameterDef, RESERVED_PREFIX, TRANSFORM_PARAMS,
};
pub use refs::{reference_key, ForeignOverrides, ReferenceMemo};
pub use schema::{Column, ForeignRef, Relationship, Schema, SchemaError, Table};
pub use values::{Row, Value};

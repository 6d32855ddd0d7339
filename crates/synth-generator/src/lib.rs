//! Generator registry and generation kernel for synthgen.
//!
//! This crate provides the [`Engine`], which turns an `(industry, name)` pair
//! plus a raw parameter map into a [`Value`](synth_core::Value). Every random
//! draw comes from one seeded `StdRng`, so a run with the same seed and the
//! same call sequence reproduces its output exactly.
//!
//! # Architecture
//!
//! ```text
//! raw params (YAML / CLI)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │        Engine        │
//! │                      │
//! │  1. Registry lookup  │
//! │  2. coerce/validate  │
//! │  3. producer(Params) │
//! │  4. post-transform   │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!          Value
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_generator::{Engine, EngineConfig};
//! use synth_core::{ParamMap, Value};
//!
//! let mut engine = Engine::new(EngineConfig::new().with_seed(42)).unwrap();
//!
//! let mut params = ParamMap::new();
//! params.insert("min".to_string(), Value::Int(1));
//! params.insert("max".to_string(), Value::Int(6));
//! let roll = engine.generate("base", "number", &params).unwrap();
//! assert!((1..=6).contains(&roll.as_i64().unwrap()));
//! ```
//!
//! # Industries
//!
//! - `base` - identifiers, people, contact, network, time, numbers, text,
//!   `enum`/`foreign`/`array`/`embedded`
//! - `aviation`, `health` - domain vocabularies
//! - `mongodb`, `postgres`, `mysql`, `sqlite` - database-flavored values

pub mod engine;
pub mod error;
pub mod generators;
pub mod producer;
pub mod registry;
pub mod transform;
pub mod vocab;

pub use engine::{parse_seed, Engine, EngineConfig, SEED_ENV_VAR};
pub use error::{GenerateError, ProducerError};
pub use producer::{Params, MAX_NESTING};
pub use registry::{Producer, Registry, RegistryBuilder};

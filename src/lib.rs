//! synthgen library
//!
//! Deterministic synthetic data for relational schemas. The binary wraps
//! these pieces in four subcommands:
//!
//! - `generate` - one value from a registered generator
//! - `seed` - every table of a YAML schema, foreign keys resolved, one file
//!   per table as CSV, JSON or SQL
//! - `list` - registered generators, optionally for one industry
//! - `info` - a generator's parameters
//!
//! # CLI Usage
//!
//! ```bash
//! # A bounded integer, reproducible across runs
//! synthgen generate base number --param min=1 --param max=10 --seed 42
//!
//! # Seed a schema into CSV files
//! synthgen seed schema.yaml --out ./data --format csv --seed 7
//!
//! # Only write orders (users is still generated for its ids)
//! synthgen seed schema.yaml --out ./data --tables orders
//! ```

pub mod config;
pub mod output;
pub mod report;

// Re-export the engine crates for embedders
pub use synth_core as core;
pub use synth_emit as emit;
pub use synth_generator as generator;
pub use synth_seeder as seeder;

pub use output::emitter_for;
pub use report::ErrorReport;

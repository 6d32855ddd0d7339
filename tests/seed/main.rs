//! Seeder integration tests.
//!
//! Each test loads a YAML fixture, seeds it into a temporary directory with
//! a fixed seed and checks the files written there.

mod formats;
mod scenarios;

use std::path::Path;
use synth_core::Schema;
use synth_generator::{Engine, EngineConfig};
use synth_seeder::{SeedError, SeedReport, Seeder};
use synthgen::emitter_for;
use synthgen::emit::OutputFormat;

pub const SEED: u64 = 7;

pub fn load_fixture(name: &str) -> Schema {
    Schema::from_file(format!("tests/fixtures/{name}")).expect("Failed to load fixture")
}

pub fn seed_into(
    schema: &Schema,
    dir: &Path,
    format: OutputFormat,
    seed: u64,
) -> Result<SeedReport, SeedError> {
    let engine = Engine::new(EngineConfig::new().with_seed(seed)).expect("engine");
    Seeder::new(engine).run(schema, dir, emitter_for(format).as_ref())
}

/// Read a CSV file into its header and records.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    let header = reader
        .headers()
        .expect("header")
        .iter()
        .map(str::to_string)
        .collect();
    let records = reader
        .records()
        .map(|r| r.expect("record").iter().map(str::to_string).collect())
        .collect();
    (header, records)
}

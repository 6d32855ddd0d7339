//! Relational seeding for synthgen.
//!
//! A [`Seeder`] validates a [`synth_core::Schema`], orders its tables so that
//! every referenced table comes before the tables referencing it, and then
//! generates each table row by row with one [`synth_generator::Engine`]:
//!
//! 1. seed-row values for the row index, if the table supplies any
//! 2. foreign-key columns, picked uniformly from the parent's generated values
//! 3. every other column, from its generator
//!
//! Primary keys and referenced columns are remembered in a
//! [`synth_core::ReferenceMemo`] as rows complete, and rows are streamed to a
//! [`synth_emit::RowEmitter`] so only one row is held at a time.

mod error;
pub mod graph;
mod seeder;

pub use error::SeedError;
pub use graph::DependencyGraph;
pub use seeder::{
    ColumnSource, PlannedColumn, PlannedTable, SeedPlan, SeedProgress, SeedReport, Seeder,
};

//! Common CLI argument definitions shared by all seed runs.

use crate::sink::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Common arguments of a seed run, whatever the output format.
#[derive(Args, Clone, Debug)]
pub struct CommonSeedArgs {
    /// Output directory (one file per table)
    #[arg(long, short = 'o')]
    pub out: PathBuf,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "SYNTHGEN_SEED")]
    pub seed: Option<u64>,

    /// Specific tables to write (comma-separated, empty = all tables from schema).
    /// Ancestors of listed tables are still generated so foreign keys resolve.
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,
}

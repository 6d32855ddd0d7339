//! Command-line interface for synthgen
//!
//! # Usage Examples
//!
//! ## Single values
//! ```bash
//! synthgen generate base uuid --seed 42
//! synthgen generate base enum --param values=red,green,blue --count 5
//! synthgen generate aviation airport_code --json
//! ```
//!
//! ## Relational data
//! ```bash
//! # All tables as SQL INSERT statements
//! synthgen seed schema.yaml --out ./data --format sql --seed 7
//!
//! # Abort when the files grow past 10 MiB
//! synthgen seed schema.yaml --out ./data --max-output-bytes 10MiB
//! ```
//!
//! ## Discovery
//! ```bash
//! synthgen list
//! synthgen list health
//! synthgen info base number
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use synth_core::{Schema, Value};
use synth_emit::CommonSeedArgs;
use synth_generator::{Engine, EngineConfig, GenerateError};
use synth_seeder::{SeedProgress, Seeder};
use synthgen::config::{
    params_from_pairs, parse_byte_size, parse_param, resolve_seed, DEFAULT_MAX_OUTPUT,
};
use synthgen::output::{emitter_for, render_info, render_list, render_value};
use synthgen::ErrorReport;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "synthgen")]
#[command(about = "Deterministic synthetic data for relational schemas")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate values from one generator
    Generate {
        /// Generator industry (base, aviation, health, mongodb, postgres, mysql, sqlite)
        industry: String,

        /// Generator name within the industry
        name: String,

        /// Generator parameter (repeatable, format: key=value)
        #[arg(long = "param", short = 'p', value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, Value)>,

        /// Random seed for deterministic generation
        #[arg(long, env = "SYNTHGEN_SEED")]
        seed: Option<u64>,

        /// Number of values to generate, one per line
        #[arg(long, short = 'n', default_value = "1")]
        count: u64,

        /// Print each value as a JSON document
        #[arg(long)]
        json: bool,
    },

    /// Generate every table of a schema file
    Seed {
        /// Path to the YAML schema file
        schema: PathBuf,

        #[command(flatten)]
        common: CommonSeedArgs,

        /// Maximum total size of the output files (e.g. 500KB, 50MiB)
        #[arg(long, default_value = DEFAULT_MAX_OUTPUT, value_parser = parse_byte_size)]
        max_output_bytes: u64,
    },

    /// List registered generators
    List {
        /// Only list this industry
        industry: Option<String>,
    },

    /// Describe a generator and its parameters
    Info {
        /// Generator industry
        industry: String,

        /// Generator name within the industry
        name: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let report = ErrorReport::from_anyhow(&e);
        eprintln!("{report}");
        std::process::exit(report.exit_code());
    }
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            industry,
            name,
            params,
            seed,
            count,
            json,
        } => run_generate(&industry, &name, params, seed, count, json),
        Commands::Seed {
            schema,
            common,
            max_output_bytes,
        } => run_seed(schema, common, max_output_bytes).await,
        Commands::List { industry } => run_list(industry.as_deref()),
        Commands::Info { industry, name } => {
            let engine = build_engine(None)?;
            let info = engine.registry().info(&industry, &name)?;
            print!("{}", render_info(info));
            Ok(())
        }
    }
}

fn build_engine(seed: Option<u64>) -> anyhow::Result<Engine> {
    let mut config = EngineConfig::new();
    config.seed = seed;
    Ok(Engine::new(config)?)
}

fn run_generate(
    industry: &str,
    name: &str,
    params: Vec<(String, Value)>,
    seed: Option<u64>,
    count: u64,
    json: bool,
) -> anyhow::Result<()> {
    let mut engine = build_engine(seed)?;
    let params = params_from_pairs(params);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for _ in 0..count {
        let value = engine.generate(industry, name, &params)?;
        writeln!(out, "{}", render_value(&value, json))?;
    }
    out.flush()?;
    Ok(())
}

fn run_list(industry: Option<&str>) -> anyhow::Result<()> {
    let engine = build_engine(None)?;
    let registry = engine.registry();
    let industries = match industry {
        Some(industry) => {
            if registry.generators(industry).is_empty() {
                return Err(GenerateError::NotFound {
                    industry: industry.to_string(),
                    name: "*".to_string(),
                }
                .into());
            }
            vec![industry]
        }
        None => registry.industries(),
    };
    print!("{}", render_list(registry, &industries));
    Ok(())
}

async fn run_seed(
    schema_path: PathBuf,
    common: CommonSeedArgs,
    max_output_bytes: u64,
) -> anyhow::Result<()> {
    let schema = Schema::from_file(&schema_path)
        .with_context(|| format!("Failed to load schema from {schema_path:?}"))?;

    let seed = resolve_seed(common.seed, schema.seed);
    let engine = build_engine(seed)?;

    let cancel = setup_signal_handler();
    let mut seeder = Seeder::new(engine)
        .with_tables(common.tables.clone())
        .with_max_output_bytes(max_output_bytes)
        .with_cancellation(cancel)
        .with_progress(|p: &SeedProgress| {
            info!(
                "Progress: {}/{} tables ({:.0}%), last '{}'",
                p.tables_done,
                p.tables_total,
                p.fraction() * 100.0,
                p.table
            );
        });

    let emitter = emitter_for(common.format);
    let out = common.out.clone();

    // The seeder is synchronous
    let report = tokio::task::spawn_blocking(move || seeder.run(&schema, &out, emitter.as_ref()))
        .await
        .context("Seeder task failed")?
        .with_context(|| format!("Failed to seed {schema_path:?}"))?;

    for table in &report.tables {
        info!(
            "{}: {} rows, {} bytes ({:.2} rows/sec)",
            table.table,
            table.rows_written,
            table.file_size_bytes,
            table.rows_per_second()
        );
    }
    eprintln!(
        "Wrote {} rows ({} bytes) to {} with seed {}",
        report.total_rows(),
        report.total_bytes(),
        common.out.display(),
        report.seed
    );
    Ok(())
}

/// Cancel the returned token on Ctrl-C; the seeder stops between rows.
fn setup_signal_handler() -> CancellationToken {
    let cancel_token = CancellationToken::new();
    let token = cancel_token.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nReceived Ctrl-C. Stopping after the current row...");
            token.cancel();
        }
    });

    cancel_token
}

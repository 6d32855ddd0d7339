//! Foreign-key ordered table generation.

use crate::error::SeedError;
use crate::graph::DependencyGraph;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use synth_core::{reference_key, ParamMap, ReferenceMemo, Row, Schema, SchemaError, Table, Value};
use synth_emit::{RowEmitter, TableMetrics, TableSink};
use synth_generator::Engine;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Where a column's values come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSource {
    /// Uniform pick among the values generated for `table.column`
    Foreign { table: String, column: String },
    /// A registered generator with its raw parameters
    Generated {
        industry: String,
        generator: String,
        params: ParamMap,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedColumn {
    pub name: String,
    pub source: ColumnSource,
}

/// One table of a run, in generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTable {
    pub name: String,
    pub row_count: u64,
    pub columns: Vec<PlannedColumn>,
    /// Columns whose values are memoized for foreign keys
    pub reference_targets: Vec<String>,
    /// Whether rows are written out; ancestors of filtered tables are
    /// generated but not written.
    pub write: bool,
}

/// Validated, ordered work for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub tables: Vec<PlannedTable>,
}

impl SeedPlan {
    /// Table names in generation order.
    pub fn order(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Names of the tables that get an output file.
    pub fn written(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| t.write)
            .map(|t| t.name.as_str())
            .collect()
    }
}

/// Progress notification sent after each table completes.
#[derive(Debug, Clone)]
pub struct SeedProgress {
    pub table: String,
    /// One-based position of the table in the run
    pub tables_done: usize,
    pub tables_total: usize,
    pub rows_generated: u64,
    pub total_rows: u64,
}

impl SeedProgress {
    /// Completed fraction of the run's tables, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.tables_total == 0 {
            1.0
        } else {
            self.tables_done as f64 / self.tables_total as f64
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    /// Seed the run's RNG started from
    pub seed: u64,
    /// Metrics of the written tables, in generation order
    pub tables: Vec<TableMetrics>,
    pub total_duration: Duration,
}

impl SeedReport {
    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_written).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.tables.iter().map(|t| t.file_size_bytes).sum()
    }
}

type ProgressFn = Box<dyn FnMut(&SeedProgress) + Send>;

/// Generates every table of a schema, parents before children, streaming
/// rows to a [`RowEmitter`].
///
/// # Example
///
/// ```ignore
/// let engine = Engine::new(EngineConfig::new().with_seed(7))?;
/// let mut seeder = Seeder::new(engine).with_tables(vec!["orders".into()]);
/// let report = seeder.run(&schema, Path::new("out"), &CsvEmitter::new())?;
/// ```
pub struct Seeder {
    engine: Engine,
    tables: Vec<String>,
    max_output_bytes: Option<u64>,
    cancel: CancellationToken,
    progress: Option<ProgressFn>,
}

impl Seeder {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            tables: Vec::new(),
            max_output_bytes: None,
            cancel: CancellationToken::new(),
            progress: None,
        }
    }

    /// Write only these tables (their ancestors are still generated).
    /// Empty means every table.
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    /// Abort once the written files exceed `limit` bytes in total.
    pub fn with_max_output_bytes(mut self, limit: u64) -> Self {
        self.max_output_bytes = Some(limit);
        self
    }

    /// Token checked between rows.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&SeedProgress) + Send + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Token a caller can cancel from another task.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Validate `schema` and compute the run's tables in generation order.
    ///
    /// Nothing is generated and the RNG is not touched.
    pub fn plan(&self, schema: &Schema) -> Result<SeedPlan, SeedError> {
        schema.validate_with_external(&self.engine.overrides().read())?;

        let graph = DependencyGraph::from_schema(schema);
        let order = graph.generation_order()?;

        let selected: Option<HashSet<String>> = if self.tables.is_empty() {
            None
        } else {
            let mut names = HashSet::new();
            for name in &self.tables {
                if schema.get_table(name).is_none() {
                    return Err(SchemaError::TableNotFound(name.clone()).into());
                }
                names.insert(name.clone());
            }
            Some(names)
        };
        let required: Option<HashSet<String>> = selected.as_ref().map(|names| {
            names
                .iter()
                .flat_map(|n| graph.ancestors(n).into_iter().chain([n.clone()]))
                .collect()
        });

        let mut tables = Vec::new();
        for name in order {
            if required.as_ref().is_some_and(|r| !r.contains(&name)) {
                continue;
            }
            let Some(table) = schema.get_table(&name) else {
                return Err(SchemaError::TableNotFound(name).into());
            };
            tables.push(PlannedTable {
                columns: self.plan_columns(table)?,
                reference_targets: schema.reference_targets(&name),
                write: selected.as_ref().is_none_or(|s| s.contains(&name)),
                row_count: table.row_count,
                name,
            });
        }
        Ok(SeedPlan { tables })
    }

    /// Resolve column sources and check every generator call up front.
    fn plan_columns(&self, table: &Table) -> Result<Vec<PlannedColumn>, SeedError> {
        let mut columns = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            let source = match column.foreign_key() {
                Some(fk) => ColumnSource::Foreign {
                    table: fk.table.clone(),
                    column: fk.column.clone(),
                },
                None => {
                    let mut params = column.params.clone();
                    let info = self
                        .engine
                        .registry()
                        .info(&column.industry, &column.generator)
                        .map_err(|source| SeedError::InvalidColumn {
                            table: table.name.clone(),
                            column: column.name.clone(),
                            source,
                        })?;
                    // Counters are per column unless the schema names one.
                    if info.get_param("sequence").is_some() && !params.contains_key("sequence") {
                        params.insert(
                            "sequence".to_string(),
                            Value::String(reference_key(&table.name, &column.name)),
                        );
                    }
                    self.engine
                        .validate(&column.industry, &column.generator, &params)
                        .map_err(|source| SeedError::InvalidColumn {
                            table: table.name.clone(),
                            column: column.name.clone(),
                            source,
                        })?;
                    ColumnSource::Generated {
                        industry: column.industry.clone(),
                        generator: column.generator.clone(),
                        params,
                    }
                }
            };
            columns.push(PlannedColumn {
                name: column.name.clone(),
                source,
            });
        }
        Ok(columns)
    }

    /// Generate `schema` into `dir`, one file per written table.
    ///
    /// The engine is reseeded with its seed first, so repeated runs of the
    /// same schema on one seeder produce the same rows. The first error
    /// aborts the run; files of tables finished before it stay on disk.
    pub fn run(
        &mut self,
        schema: &Schema,
        dir: &Path,
        emitter: &dyn RowEmitter,
    ) -> Result<SeedReport, SeedError> {
        let start_time = Instant::now();
        let plan = self.plan(schema)?;

        fs::create_dir_all(dir).map_err(|source| SeedError::OutputDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let seed = self.engine.seed();
        self.engine.reseed(seed);
        // Tables of this schema resolve only against their own rows.
        let mut memo = self.engine.overrides().snapshot();
        for table in &schema.tables {
            memo.remove_table(&table.name);
        }

        info!(
            "Seeding {} tables ({} written) as {} into '{}' with seed {}",
            plan.tables.len(),
            plan.written().len(),
            emitter.format(),
            dir.display(),
            seed
        );

        let tables_total = plan.tables.len();
        let mut total_rows = 0u64;
        let mut bytes_so_far = 0u64;
        let mut report = SeedReport {
            seed,
            tables: Vec::new(),
            total_duration: Duration::ZERO,
        };

        for (position, table) in plan.tables.iter().enumerate() {
            let Some(definition) = schema.get_table(&table.name) else {
                return Err(SchemaError::TableNotFound(table.name.clone()).into());
            };
            let metrics =
                self.seed_table(table, definition, dir, emitter, &mut memo, bytes_so_far)?;

            bytes_so_far += metrics.file_size_bytes;
            total_rows += table.row_count;
            if let Some(callback) = self.progress.as_mut() {
                callback(&SeedProgress {
                    table: table.name.clone(),
                    tables_done: position + 1,
                    tables_total,
                    rows_generated: table.row_count,
                    total_rows,
                });
            }
            if table.write {
                report.tables.push(metrics);
            }
        }

        report.total_duration = start_time.elapsed();
        info!(
            "Seeding complete: {} rows, {} bytes in {:?}",
            report.total_rows(),
            report.total_bytes(),
            report.total_duration
        );
        Ok(report)
    }

    fn seed_table(
        &mut self,
        table: &PlannedTable,
        definition: &Table,
        dir: &Path,
        emitter: &dyn RowEmitter,
        memo: &mut ReferenceMemo,
        bytes_before: u64,
    ) -> Result<TableMetrics, SeedError> {
        let start_time = Instant::now();
        let mut metrics = TableMetrics::new(&table.name);

        let mut sink = if table.write {
            Some(
                emitter
                    .begin_table(dir, &table.name)
                    .map_err(|e| SeedError::emit(&table.name, e))?,
            )
        } else {
            debug!("'{}' is only generated for its references", table.name);
            None
        };

        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        for index in 0..table.row_count {
            if self.cancel.is_cancelled() {
                warn!(
                    "Cancelled while generating '{}' after {} rows",
                    table.name, index
                );
                if let Some(sink) = sink {
                    sink.finish().map_err(|e| SeedError::emit(&table.name, e))?;
                }
                return Err(SeedError::Cancelled {
                    table: table.name.clone(),
                    rows: index,
                });
            }

            let gen_start = Instant::now();
            let row = self.build_row(table, definition.seed_row(index), index, memo)?;
            for target in &table.reference_targets {
                if let Some(value) = row.get(target) {
                    memo.push(&table.name, target, value.clone());
                }
            }
            generation_time += gen_start.elapsed();

            if let Some(sink) = sink.as_mut() {
                let write_start = Instant::now();
                sink.write_row(&row)
                    .map_err(|e| SeedError::emit(&table.name, e))?;
                write_time += write_start.elapsed();

                if let Some(limit) = self.max_output_bytes {
                    if bytes_before + sink.bytes_written() > limit {
                        return Err(SeedError::OutputLimit {
                            table: table.name.clone(),
                            limit,
                        });
                    }
                }
            }

            metrics.rows_written += 1;
            if metrics.rows_written % 10000 == 0 {
                debug!("{}: generated {} rows", table.name, metrics.rows_written);
            }
        }

        if let Some(sink) = sink {
            let write_start = Instant::now();
            metrics.file_size_bytes = finish_sink(sink, &table.name)?;
            write_time += write_start.elapsed();
        }

        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;

        info!(
            "Table '{}': {} rows, {} bytes in {:?} ({:.2} rows/sec)",
            table.name,
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.rows_per_second()
        );
        Ok(metrics)
    }

    /// Build one row: seed-row values first, then every missing column in
    /// declaration order.
    fn build_row(
        &mut self,
        table: &PlannedTable,
        seed_row: Option<&Row>,
        index: u64,
        memo: &ReferenceMemo,
    ) -> Result<Row, SeedError> {
        let mut row = Row::new();
        for column in &table.columns {
            if let Some(value) = seed_row.and_then(|r| r.get(&column.name)) {
                row.insert(column.name.clone(), value.clone());
                continue;
            }

            let value = match &column.source {
                ColumnSource::Foreign {
                    table: parent,
                    column: parent_column,
                } => self
                    .engine
                    .choose(memo.values(parent, parent_column))
                    .ok_or_else(|| SeedError::MissingReference {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        row: index,
                        target: reference_key(parent, parent_column),
                    })?,
                ColumnSource::Generated {
                    industry,
                    generator,
                    params,
                } => self
                    .engine
                    .generate_with_refs(industry, generator, params, memo)
                    .map_err(|source| SeedError::Generation {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        row: index,
                        source,
                    })?,
            };
            row.insert(column.name.clone(), value);
        }

        // Seed-row fields outside the declared columns are kept at the end.
        if let Some(seed_row) = seed_row {
            for (name, value) in seed_row.iter() {
                if !row.contains(name) {
                    row.insert(name, value.clone());
                }
            }
        }
        Ok(row)
    }
}

fn finish_sink(sink: Box<dyn TableSink>, table: &str) -> Result<u64, SeedError> {
    sink.finish().map_err(|e| SeedError::emit(table, e))
}

//! Schema definitions for relational data generation.
//!
//! A [`Schema`] is a set of [`Table`]s whose [`Column`]s are each bound to a
//! generator `(industry, generator, params)`, optionally referencing a column
//! of another table through a foreign key.
//!
//! ## YAML layout
//!
//! ```yaml
//! seed: 7                      # optional
//! tables:
//!   - name: users
//!     row_count: 3
//!     columns:
//!       - name: id
//!         type: uuid
//!         generator: uuid
//!         primary_key: true
//!       - name: name
//!         type: text
//!         generator: firstname
//!   - name: orders
//!     row_count: 6
//!     seed_rows:               # optional, pre-known values per row index
//!       - { user_id: "..." }
//!     columns:
//!       - name: user_id
//!         type: uuid
//!         foreign_key: { table: users, column: id }
//! relationships: []            # optional, merged with column foreign keys
//! ```

use crate::error::ErrorKind;
use crate::params::ParamMap;
use crate::refs::{reference_key, ReferenceMemo};
use crate::values::{Row, Value};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table declared twice
    #[error("Duplicate table: {0}")]
    DuplicateTable(String),

    /// Column declared twice within a table
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// More than one column flagged as primary key
    #[error("Table '{table}' declares more than one primary key: {columns:?}")]
    MultiplePrimaryKeys { table: String, columns: Vec<String> },

    /// Column has neither a generator nor a foreign key
    #[error("Column '{column}' in table '{table}' has no generator")]
    MissingGenerator { table: String, column: String },

    /// Column marked foreign without a reference
    #[error("Column '{column}' in table '{table}' is foreign but has no reference")]
    MissingForeignRef { table: String, column: String },

    /// Foreign key points at a table or column that does not exist
    #[error("Column '{table}.{column}' references unknown column '{target}'")]
    DanglingReference {
        table: String,
        column: String,
        target: String,
    },

    /// Explicit relationship disagrees with a column's foreign key
    #[error("Relationship for '{table}.{column}' conflicts with its foreign key: {message}")]
    RelationshipConflict {
        table: String,
        column: String,
        message: String,
    },

    /// Foreign-key graph contains a cycle
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// More seed rows than rows to generate
    #[error("Table '{table}' has {seed_rows} seed rows but row_count is {row_count}")]
    TooManySeedRows {
        table: String,
        seed_rows: usize,
        row_count: u64,
    },

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Column not found in table schema
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },
}

impl SchemaError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::IoError(_) => ErrorKind::Io,
            _ => ErrorKind::Schema,
        }
    }
}

// ============================================================================
// Schema Types
// ============================================================================

fn default_industry() -> String {
    "base".to_string()
}

fn deserialize_params<'de, D>(deserializer: D) -> Result<ParamMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_yaml::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(|(k, v)| (k.clone(), Value::from_yaml(v)))
        .collect())
}

fn deserialize_seed_rows<'de, D>(deserializer: D) -> Result<Vec<Row>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_yaml::Mapping>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(Row::from_yaml_mapping)
        .collect())
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForeignRef {
    pub table: String,
    pub column: String,
}

impl ForeignRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Memo key of the referenced column.
    pub fn key(&self) -> String {
        reference_key(&self.table, &self.column)
    }

    fn is_empty(&self) -> bool {
        self.table.is_empty() || self.column.is_empty()
    }
}

/// A column bound to a generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Logical SQL-ish type, informational only
    #[serde(rename = "type", default)]
    pub column_type: String,

    /// Industry of the generator
    #[serde(default = "default_industry")]
    pub industry: String,

    /// Generator name within the industry
    #[serde(default)]
    pub generator: String,

    /// Raw generator parameters
    #[serde(default, deserialize_with = "deserialize_params")]
    pub params: ParamMap,

    /// Whether this column is the table's primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Whether values come from another table's column
    #[serde(default)]
    pub is_foreign: bool,

    /// Referenced column when `is_foreign` is set
    #[serde(default, rename = "foreign_key", alias = "foreign_ref")]
    pub foreign_ref: Option<ForeignRef>,
}

impl Column {
    /// Create a column bound to a `base` generator.
    pub fn new(name: impl Into<String>, generator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: String::new(),
            industry: default_industry(),
            generator: generator.into(),
            params: ParamMap::new(),
            primary_key: false,
            is_foreign: false,
            foreign_ref: None,
        }
    }

    /// Create a foreign-key column.
    pub fn foreign(name: impl Into<String>, table: &str, column: &str) -> Self {
        let mut col = Self::new(name, "foreign");
        col.is_foreign = true;
        col.foreign_ref = Some(ForeignRef::new(table, column));
        col
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = column_type.into();
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Referenced column, if this is a foreign-key column.
    pub fn foreign_key(&self) -> Option<&ForeignRef> {
        if self.is_foreign {
            self.foreign_ref.as_ref()
        } else {
            None
        }
    }

    /// Apply the `generator: foreign` shorthand and infer `is_foreign`.
    fn normalize(&mut self) {
        if self.foreign_ref.is_none() && self.generator == "foreign" {
            let table = self.params.get("table").and_then(Value::as_str);
            let column = self.params.get("column").and_then(Value::as_str);
            if let (Some(table), Some(column)) = (table, column) {
                self.foreign_ref = Some(ForeignRef::new(table, column));
            }
        }
        if self.foreign_ref.is_some() {
            self.is_foreign = true;
        }
    }
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<Column>,

    /// Number of rows to generate
    pub row_count: u64,

    /// Pre-known values, one map per leading row index
    #[serde(default, deserialize_with = "deserialize_seed_rows")]
    pub seed_rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, row_count: u64, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            row_count,
            seed_rows: Vec::new(),
        }
    }

    pub fn with_seed_rows(mut self, seed_rows: Vec<Row>) -> Self {
        self.seed_rows = seed_rows;
        self
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The primary-key column: the one flagged, else a column named `id`.
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.primary_key)
            .or_else(|| self.get_column("id"))
    }

    /// Seed row for a row index, if any.
    pub fn seed_row(&self, index: u64) -> Option<&Row> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.seed_rows.get(i))
    }

    /// Tables this table references, deduplicated, in column order.
    pub fn parents(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.columns
            .iter()
            .filter_map(Column::foreign_key)
            .map(|r| r.table.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

/// A foreign-key edge `child.column → parent.column`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relationship {
    pub child_table: String,
    pub child_column: String,
    pub parent_table: String,
    pub parent_column: String,
}

/// Full schema with generators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Schema {
    /// Table definitions
    pub tables: Vec<Table>,

    /// Explicit foreign-key edges, merged into column references on load
    #[serde(default)]
    pub relationships: Vec<Relationship>,

    /// Default seed for runs of this schema
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Schema {
    /// Build a schema, merging explicit relationships into the columns.
    pub fn new(tables: Vec<Table>, relationships: Vec<Relationship>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            tables,
            relationships,
            seed: None,
        };
        schema.normalize()?;
        Ok(schema)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: Schema = serde_yaml::from_str(yaml)?;
        schema.normalize()?;
        Ok(schema)
    }

    /// Merge explicit relationships into column foreign keys.
    fn normalize(&mut self) -> Result<(), SchemaError> {
        for table in &mut self.tables {
            for column in &mut table.columns {
                column.normalize();
            }
        }

        for rel in &self.relationships {
            let column = self
                .tables
                .iter_mut()
                .find(|t| t.name == rel.child_table)
                .ok_or_else(|| SchemaError::TableNotFound(rel.child_table.clone()))?
                .columns
                .iter_mut()
                .find(|c| c.name == rel.child_column)
                .ok_or_else(|| SchemaError::ColumnNotFound {
                    table: rel.child_table.clone(),
                    column: rel.child_column.clone(),
                })?;

            let target = ForeignRef::new(&rel.parent_table, &rel.parent_column);
            match &column.foreign_ref {
                Some(existing) if *existing != target => {
                    return Err(SchemaError::RelationshipConflict {
                        table: rel.child_table.clone(),
                        column: rel.child_column.clone(),
                        message: format!(
                            "relationship points at {} but foreign_key points at {}",
                            target.key(),
                            existing.key()
                        ),
                    });
                }
                _ => {
                    column.foreign_ref = Some(target);
                    column.is_foreign = true;
                }
            }
        }
        Ok(())
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Get all table names in declaration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Every foreign-key edge, in table then column declaration order.
    pub fn foreign_keys(&self) -> Vec<Relationship> {
        self.tables
            .iter()
            .flat_map(|t| {
                t.columns.iter().filter_map(move |c| {
                    c.foreign_key().map(|r| Relationship {
                        child_table: t.name.clone(),
                        child_column: c.name.clone(),
                        parent_table: r.table.clone(),
                        parent_column: r.column.clone(),
                    })
                })
            })
            .collect()
    }

    /// Columns of `table` whose values must be memoized: the primary key
    /// plus every column some foreign key points at.
    pub fn reference_targets(&self, table: &str) -> Vec<String> {
        let Some(t) = self.get_table(table) else {
            return Vec::new();
        };
        let referenced: HashSet<&str> = self
            .tables
            .iter()
            .flat_map(|other| other.columns.iter().filter_map(Column::foreign_key))
            .filter(|r| r.table == table)
            .map(|r| r.column.as_str())
            .collect();
        let pk = t.primary_key().map(|c| c.name.as_str());

        t.columns
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| Some(*name) == pk || referenced.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Structural validation with no external reference values.
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.validate_with_external(&ReferenceMemo::new())
    }

    /// Structural validation.
    ///
    /// A foreign key pointing outside the schema is accepted when `external`
    /// already holds values for the referenced column. Cycle detection is
    /// left to the dependency graph built by the seeder.
    pub fn validate_with_external(&self, external: &ReferenceMemo) -> Result<(), SchemaError> {
        let mut table_names = HashSet::new();
        for table in &self.tables {
            if !table_names.insert(table.name.as_str()) {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }

            let mut column_names = HashSet::new();
            for column in &table.columns {
                if !column_names.insert(column.name.as_str()) {
                    return Err(SchemaError::DuplicateColumn {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    });
                }
                if column.is_foreign
                    && column.foreign_ref.as_ref().is_none_or(ForeignRef::is_empty)
                {
                    return Err(SchemaError::MissingForeignRef {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    });
                }
                if !column.is_foreign && column.generator.is_empty() {
                    return Err(SchemaError::MissingGenerator {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    });
                }
            }

            let flagged: Vec<String> = table
                .columns
                .iter()
                .filter(|c| c.primary_key)
                .map(|c| c.name.clone())
                .collect();
            if flagged.len() > 1 {
                return Err(SchemaError::MultiplePrimaryKeys {
                    table: table.name.clone(),
                    columns: flagged,
                });
            }

            if table.seed_rows.len() as u64 > table.row_count {
                return Err(SchemaError::TooManySeedRows {
                    table: table.name.clone(),
                    seed_rows: table.seed_rows.len(),
                    row_count: table.row_count,
                });
            }
        }

        for fk in self.foreign_keys() {
            let target_exists = self
                .get_table(&fk.parent_table)
                .is_some_and(|t| t.get_column(&fk.parent_column).is_some());
            let external_exists = self.get_table(&fk.parent_table).is_none()
                && external.contains_key(&reference_key(&fk.parent_table, &fk.parent_column));
            if !target_exists && !external_exists {
                return Err(SchemaError::DanglingReference {
                    table: fk.child_table,
                    column: fk.child_column,
                    target: reference_key(&fk.parent_table, &fk.parent_column),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

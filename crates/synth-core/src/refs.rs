//! Reference values for foreign keys.
//!
//! A [`ReferenceMemo`] maps `table.column` to the values generated so far for
//! that column. The seeder owns one memo per run. [`ForeignOverrides`] is a
//! shared, externally supplied memo copied into every run before the first
//! table is generated, minus the tables the run generates itself.

use crate::values::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// Memo key for a column.
pub fn reference_key(table: &str, column: &str) -> String {
    format!("{table}.{column}")
}

/// Values generated so far, keyed by `table.column`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMemo {
    values: HashMap<String, Vec<Value>>,
}

impl ReferenceMemo {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `table.column`.
    pub fn push(&mut self, table: &str, column: &str, value: Value) {
        self.values
            .entry(reference_key(table, column))
            .or_default()
            .push(value);
    }

    /// Replace every value stored under a key.
    pub fn set(&mut self, key: impl Into<String>, values: Vec<Value>) {
        self.values.insert(key.into(), values);
    }

    /// Values stored under `table.column`; empty when none.
    pub fn values(&self, table: &str, column: &str) -> &[Value] {
        self.get(&reference_key(table, column))
    }

    /// Values stored under a raw key; empty when none.
    pub fn get(&self, key: &str) -> &[Value] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any value is stored under a key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Drop every column of `table`.
    pub fn remove_table(&mut self, table: &str) {
        let prefix = format!("{table}.");
        self.values.retain(|key, _| !key.starts_with(&prefix));
    }

    /// Whether the memo holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(Vec::is_empty)
    }
}

/// Externally supplied reference values shared between runs.
///
/// Readers take a shared lock for the duration of a run setup; updates take
/// the exclusive lock and must finish before a dependent run starts.
#[derive(Debug, Clone, Default)]
pub struct ForeignOverrides {
    inner: Arc<RwLock<ReferenceMemo>>,
}

impl ForeignOverrides {
    /// Create an empty override table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the values of `table.column`.
    pub fn set(&self, table: &str, column: &str, values: Vec<Value>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(reference_key(table, column), values);
    }

    /// Shared read access to the current table.
    pub fn read(&self) -> RwLockReadGuard<'_, ReferenceMemo> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of the current table.
    pub fn snapshot(&self) -> ReferenceMemo {
        self.read().clone()
    }
}

//! The parameter view handed to producers.

use crate::engine::invoke;
use crate::error::ProducerError;
use crate::registry::Registry;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use std::collections::HashMap;
use synth_core::{ParamMap, ReferenceMemo, Value};

/// Maximum depth of generators calling generators (arrays of embedded
/// documents and so on).
pub const MAX_NESTING: usize = 8;

/// Engine state lent to a single producer call.
pub(crate) struct Scope<'a> {
    pub(crate) rng: &'a mut StdRng,
    pub(crate) counters: &'a mut HashMap<String, i64>,
    pub(crate) refs: &'a ReferenceMemo,
    pub(crate) registry: &'a Registry,
    pub(crate) now: DateTime<Utc>,
    pub(crate) depth: usize,
}

/// Validated parameters plus the engine RNG.
///
/// Every declared parameter with a default is present. The RNG is the
/// engine's own deterministic source, reachable through [`Params::rand`];
/// producers must not use any other source of randomness.
pub struct Params<'a> {
    values: &'a ParamMap,
    scope: Scope<'a>,
}

impl<'a> Params<'a> {
    pub(crate) fn new(values: &'a ParamMap, scope: Scope<'a>) -> Self {
        Self { values, scope }
    }

    /// The engine RNG.
    pub fn rand(&mut self) -> &mut StdRng {
        &mut *self.scope.rng
    }

    /// All validated values.
    pub fn values(&self) -> &'a ParamMap {
        self.values
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.values.get(name)
    }

    fn require(&self, name: &str) -> Result<&'a Value, ProducerError> {
        self.get(name)
            .ok_or_else(|| ProducerError::invalid(name, "parameter is missing"))
    }

    pub fn get_str(&self, name: &str) -> Result<&'a str, ProducerError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| ProducerError::invalid(name, "expected a string"))
    }

    /// A string parameter, `None` when absent or empty.
    pub fn opt_str(&self, name: &str) -> Option<&'a str> {
        self.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn get_int(&self, name: &str) -> Result<i64, ProducerError> {
        self.require(name)?
            .as_i64()
            .ok_or_else(|| ProducerError::invalid(name, "expected an integer"))
    }

    pub fn get_float(&self, name: &str) -> Result<f64, ProducerError> {
        self.require(name)?
            .as_f64()
            .ok_or_else(|| ProducerError::invalid(name, "expected a number"))
    }

    /// A boolean flag, false when absent.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// A string list; fails when the list is empty.
    pub fn get_list(&self, name: &str) -> Result<Vec<&'a str>, ProducerError> {
        let items: Vec<&str> = self
            .require(name)?
            .as_list()
            .ok_or_else(|| ProducerError::invalid(name, "expected a list"))?
            .iter()
            .filter_map(Value::as_str)
            .collect();
        if items.is_empty() {
            return Err(ProducerError::invalid(name, "list must not be empty"));
        }
        Ok(items)
    }

    /// Integer bounds `(min, max)`, rejecting inverted ranges.
    pub fn int_bounds(&self, min: &str, max: &str) -> Result<(i64, i64), ProducerError> {
        let (lo, hi) = (self.get_int(min)?, self.get_int(max)?);
        if lo > hi {
            return Err(ProducerError::invalid(
                min,
                format!("{min} ({lo}) is greater than {max} ({hi})"),
            ));
        }
        Ok((lo, hi))
    }

    /// Float bounds `(min, max)`, rejecting inverted ranges.
    pub fn float_bounds(&self, min: &str, max: &str) -> Result<(f64, f64), ProducerError> {
        let (lo, hi) = (self.get_float(min)?, self.get_float(max)?);
        if lo > hi {
            return Err(ProducerError::invalid(
                min,
                format!("{min} ({lo}) is greater than {max} ({hi})"),
            ));
        }
        Ok((lo, hi))
    }

    /// Advance the counter stored under `key` and return its new value.
    ///
    /// The first call returns `start`.
    pub fn next_counter(&mut self, key: &str, start: i64, step: i64) -> i64 {
        let next = match self.scope.counters.get(key) {
            Some(last) => last.saturating_add(step),
            None => start,
        };
        self.scope.counters.insert(key.to_string(), next);
        next
    }

    /// Previously generated reference values.
    pub fn refs(&self) -> &'a ReferenceMemo {
        self.scope.refs
    }

    /// Reference time for relative windows ("the last year").
    pub fn now(&self) -> DateTime<Utc> {
        self.scope.now
    }

    /// Call another generator with the same RNG and counters.
    pub fn generate(
        &mut self,
        industry: &str,
        name: &str,
        raw: &ParamMap,
    ) -> Result<Value, ProducerError> {
        if self.scope.depth >= MAX_NESTING {
            return Err(ProducerError::failed(format!(
                "generator nesting deeper than {MAX_NESTING} levels"
            )));
        }
        let scope = Scope {
            rng: &mut *self.scope.rng,
            counters: &mut *self.scope.counters,
            refs: self.scope.refs,
            registry: self.scope.registry,
            now: self.scope.now,
            depth: self.scope.depth + 1,
        };
        invoke(scope, industry, name, raw).map_err(|e| ProducerError::Nested(Box::new(e)))
    }
}

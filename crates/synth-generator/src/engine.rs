//! The generation kernel.
//!
//! An [`Engine`] owns one deterministic RNG and serves `generate` calls in
//! order: look up the producer, coerce and validate the parameters, run the
//! producer with the engine RNG, then apply the post-transforms.
//!
//! The RNG is not shared: callers wanting parallelism build independent
//! engines with [`Engine::fork`], which share only the immutable registry.

use crate::error::GenerateError;
use crate::producer::{Params, Scope};
use crate::registry::Registry;
use crate::transform;
use chrono::{DateTime, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use synth_core::{ForeignOverrides, ParamMap, ReferenceMemo, Value};
use tracing::debug;

/// Environment variable holding the default seed.
pub const SEED_ENV_VAR: &str = "SYNTHGEN_SEED";

/// Engine construction options.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// RNG seed; drawn from system entropy when unset
    pub seed: Option<u64>,

    /// Reference time that relative windows ("last N days") end at.
    ///
    /// Defaults to the start of the current UTC day rather than the current
    /// instant, so a seeded run repeated on the same day produces the same
    /// dates. Windows therefore exclude the current day unless a time is
    /// pinned here.
    pub reference_time: Option<DateTime<Utc>>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_reference_time(mut self, time: DateTime<Utc>) -> Self {
        self.reference_time = Some(time);
        self
    }

    /// Read the seed from [`SEED_ENV_VAR`] if it is set.
    pub fn from_env() -> Result<Self, GenerateError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
            config.seed = Some(parse_seed(&raw)?);
        }
        Ok(config)
    }
}

/// Parse a seed given as text.
pub fn parse_seed(raw: &str) -> Result<u64, GenerateError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| GenerateError::InvalidSeed {
            value: raw.to_string(),
        })
}

fn midnight_today() -> DateTime<Utc> {
    Utc::now()
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Run one generator call against borrowed engine state.
pub(crate) fn invoke(
    scope: Scope<'_>,
    industry: &str,
    name: &str,
    raw: &ParamMap,
) -> Result<Value, GenerateError> {
    let registry = scope.registry;
    let producer = registry.lookup(industry, name)?;
    let values = registry
        .schema()
        .coerce_and_validate(industry, name, raw)
        .map_err(|e| GenerateError::from_param(industry, name, e))?;

    let mut params = Params::new(&values, scope);
    let value =
        producer(&mut params).map_err(|e| GenerateError::from_producer(industry, name, e))?;

    Ok(transform::apply(value, &values))
}

/// Deterministic generation engine.
pub struct Engine {
    registry: Arc<Registry>,
    rng: StdRng,
    seed: u64,
    counters: HashMap<String, i64>,
    overrides: ForeignOverrides,
    reference_time: DateTime<Utc>,
}

impl Engine {
    /// Create an engine over the full producer catalog.
    pub fn new(config: EngineConfig) -> Result<Self, GenerateError> {
        let registry = Arc::new(Registry::with_defaults()?);
        Ok(Self::with_registry(registry, config))
    }

    /// Create an engine over an existing registry.
    pub fn with_registry(registry: Arc<Registry>, config: EngineConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(seed, "Engine created");
        Self {
            registry,
            rng: StdRng::seed_from_u64(seed),
            seed,
            counters: HashMap::new(),
            overrides: ForeignOverrides::new(),
            reference_time: config.reference_time.unwrap_or_else(midnight_today),
        }
    }

    /// Share an externally maintained foreign-value table.
    pub fn with_overrides(mut self, overrides: ForeignOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Seed the RNG was last initialized with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn overrides(&self) -> &ForeignOverrides {
        &self.overrides
    }

    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Generate one value.
    ///
    /// The `foreign` generator resolves against the engine's override table.
    pub fn generate(
        &mut self,
        industry: &str,
        name: &str,
        raw: &ParamMap,
    ) -> Result<Value, GenerateError> {
        let overrides = self.overrides.clone();
        let refs = overrides.read();
        self.generate_with_refs(industry, name, raw, &refs)
    }

    /// Generate one value, resolving foreign references against `refs`.
    pub fn generate_with_refs(
        &mut self,
        industry: &str,
        name: &str,
        raw: &ParamMap,
        refs: &ReferenceMemo,
    ) -> Result<Value, GenerateError> {
        let scope = Scope {
            rng: &mut self.rng,
            counters: &mut self.counters,
            refs,
            registry: self.registry.as_ref(),
            now: self.reference_time,
            depth: 0,
        };
        invoke(scope, industry, name, raw)
    }

    /// Coerce and validate `raw` for a generator without producing a value
    /// or touching the RNG.
    pub fn validate(
        &self,
        industry: &str,
        name: &str,
        raw: &ParamMap,
    ) -> Result<ParamMap, GenerateError> {
        self.registry.lookup(industry, name)?;
        self.registry
            .schema()
            .coerce_and_validate(industry, name, raw)
            .map_err(|e| GenerateError::from_param(industry, name, e))
    }

    /// Pick one of `values` uniformly with the engine RNG.
    pub fn choose(&mut self, values: &[Value]) -> Option<Value> {
        values.choose(&mut self.rng).cloned()
    }

    /// An independent engine sharing this engine's registry, overrides and
    /// reference time.
    pub fn fork(&self, seed: u64) -> Engine {
        Engine {
            registry: Arc::clone(&self.registry),
            rng: StdRng::seed_from_u64(seed),
            seed,
            counters: HashMap::new(),
            overrides: self.overrides.clone(),
            reference_time: self.reference_time,
        }
    }

    /// Restart the RNG from `seed` and reset every auto-increment counter.
    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "Engine reseeded");
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
        self.counters.clear();
    }
}

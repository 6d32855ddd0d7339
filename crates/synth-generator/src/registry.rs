//! Generator registry: `(industry, name) → producer`.
//!
//! Registration happens once, through a [`RegistryBuilder`]. Building yields an
//! immutable [`Registry`] that is shared behind an `Arc` and read without
//! locking.

use crate::error::{GenerateError, ProducerError};
use crate::generators;
use crate::producer::Params;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use synth_core::{GeneratorInfo, ParamSchema, Value};
use tracing::debug;

/// A value producer.
///
/// Producers read their validated parameters and the engine RNG from
/// [`Params`] and must not keep anything from it after returning.
pub type Producer = Arc<dyn Fn(&mut Params<'_>) -> Result<Value, ProducerError> + Send + Sync>;

/// Collects generator declarations and producers before the registry is
/// frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    schema: ParamSchema,
    producers: HashMap<String, HashMap<String, Producer>>,
    errors: Vec<GenerateError>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a producer under the industry and name of `info`.
    ///
    /// The post-transform parameters are declared implicitly. Registration
    /// errors are collected and reported by [`RegistryBuilder::build`].
    pub fn register<F>(&mut self, info: GeneratorInfo, producer: F) -> &mut Self
    where
        F: Fn(&mut Params<'_>) -> Result<Value, ProducerError> + Send + Sync + 'static,
    {
        let info = info.with_transform_params();
        let industry = info.industry.clone();
        let name = info.name.clone();

        if let Err(e) = self.schema.register(info) {
            self.errors.push(GenerateError::Registration(e));
            return self;
        }
        self.producers
            .entry(industry)
            .or_default()
            .insert(name, Arc::new(producer));
        self
    }

    /// Freeze the registry, failing on the first rejected registration.
    pub fn build(mut self) -> Result<Registry, GenerateError> {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }
        debug!(generators = self.schema.len(), "Generator registry built");
        Ok(Registry {
            schema: self.schema,
            producers: self.producers,
        })
    }
}

/// Immutable registry of producers and their parameter declarations.
pub struct Registry {
    schema: ParamSchema,
    producers: HashMap<String, HashMap<String, Producer>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry holding the full producer catalog.
    pub fn with_defaults() -> Result<Self, GenerateError> {
        let mut builder = RegistryBuilder::new();
        generators::register_all(&mut builder);
        builder.build()
    }

    /// Look up a producer.
    pub fn lookup(&self, industry: &str, name: &str) -> Result<&Producer, GenerateError> {
        self.producers
            .get(industry)
            .and_then(|generators| generators.get(name))
            .ok_or_else(|| GenerateError::NotFound {
                industry: industry.to_string(),
                name: name.to_string(),
            })
    }

    /// Declaration of a generator.
    pub fn info(&self, industry: &str, name: &str) -> Result<&GeneratorInfo, GenerateError> {
        self.schema
            .info(industry, name)
            .map_err(|e| GenerateError::from_param(industry, name, e))
    }

    /// Registered industries, sorted.
    pub fn industries(&self) -> Vec<&str> {
        self.schema.industries()
    }

    /// Generators of an industry, sorted by name.
    pub fn generators(&self, industry: &str) -> Vec<&GeneratorInfo> {
        self.schema.generators(industry)
    }

    /// Parameter declarations of every generator.
    pub fn schema(&self) -> &ParamSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.schema.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schema.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("generators", &self.schema.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineConfig};
    use chrono::{TimeZone, Utc};
    use synth_core::{coerce, ErrorKind, ParamMap, ParamType, ParameterDef};

    fn constant(_: &mut Params<'_>) -> Result<Value, ProducerError> {
        Ok(Value::from("x"))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut builder = Registry::builder();
        builder.register(GeneratorInfo::new("test", "constant", "Always x"), constant);
        let registry = builder.build().unwrap();

        assert!(registry.lookup("test", "constant").is_ok());
        assert_eq!(registry.industries(), vec!["test"]);
        assert_eq!(registry.len(), 1);

        let info = registry.info("test", "constant").unwrap();
        assert!(info.get_param("uppercase").is_some());
        assert!(info.get_param("suffix").is_some());
    }

    #[test]
    fn test_lookup_not_found() {
        let registry = Registry::builder().build().unwrap();
        let err = registry.lookup("base", "missing").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            registry.info("base", "missing").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_duplicate_registration_fails_build() {
        let mut builder = Registry::builder();
        builder
            .register(GeneratorInfo::new("test", "constant", "a"), constant)
            .register(GeneratorInfo::new("test", "constant", "b"), constant);
        let err = builder.build().unwrap_err();
        assert!(matches!(err, GenerateError::Registration(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_invalid_declaration_fails_build() {
        let mut builder = Registry::builder();
        builder.register(
            GeneratorInfo::new("test", "bad", "select without options")
                .param(ParameterDef::new("mode", ParamType::Select)),
            constant,
        );
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_default_catalog() {
        let registry = Registry::with_defaults().unwrap();
        assert!(registry.len() >= 100);
        for industry in ["base", "aviation", "health", "mongodb", "postgres", "mysql", "sqlite"] {
            assert!(
                !registry.generators(industry).is_empty(),
                "industry {industry} has no generators"
            );
        }
    }

    fn all_generators(registry: &Registry) -> Vec<&GeneratorInfo> {
        registry
            .industries()
            .into_iter()
            .flat_map(|industry| registry.generators(industry))
            .collect()
    }

    #[test]
    fn test_every_default_coerces_from_text() {
        let registry = Registry::with_defaults().unwrap();
        for info in all_generators(&registry) {
            for param in &info.parameters {
                let Some(text) = param.default_as_text() else {
                    continue;
                };
                let coerced = coerce(param, &Value::String(text.clone())).unwrap_or_else(|e| {
                    panic!("{}/{} {}: '{text}': {e}", info.industry, info.name, param.name)
                });
                assert_eq!(
                    Some(&coerced),
                    param.default.as_ref(),
                    "{}/{} {}",
                    info.industry,
                    info.name,
                    param.name
                );
            }
        }
    }

    #[test]
    fn test_catalog_is_deterministic_per_seed() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let config = EngineConfig::new().with_seed(99).with_reference_time(now);
        let mut first = Engine::new(config.clone()).unwrap();
        let mut second = Engine::new(config).unwrap();

        let registry = Registry::with_defaults().unwrap();
        let params = ParamMap::new();
        let mut produced = 0;
        for info in all_generators(&registry) {
            if info.parameters.iter().any(|p| p.required) {
                continue;
            }
            let a = first.generate(&info.industry, &info.name, &params);
            let b = second.generate(&info.industry, &info.name, &params);
            assert_eq!(
                a.as_ref().ok(),
                b.as_ref().ok(),
                "{}/{}",
                info.industry,
                info.name
            );
            produced += usize::from(a.is_ok());
        }
        assert!(produced >= 50);
    }
}

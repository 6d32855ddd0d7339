//! Aggregate producers: embedded documents and arrays.
//!
//! Both defer to other generators through [`Params::generate`], so the
//! nested values draw from the same engine RNG.

use super::{int_in, BASE};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::BTreeMap;
use synth_core::{GeneratorInfo, ParamMap, ParamType, ParameterDef, Value};

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(BASE, "embedded", "Nested document built from other generators")
                .param(
                    ParameterDef::new("fields", ParamType::StringList)
                        .describe("Entries of the form key:generator or key:industry/generator")
                        .default_value(Value::List(vec![]))
                        .example("name:firstname,city:city"),
                ),
            embedded,
        )
        .register(
            GeneratorInfo::new(BASE, "array", "List of strings produced by another generator")
                .param(
                    ParameterDef::new("generator", ParamType::String)
                        .describe("Element generator")
                        .default_value("word"),
                )
                .param(
                    ParameterDef::new("industry", ParamType::String)
                        .describe("Industry of the element generator")
                        .default_value(BASE),
                )
                .param(count_param("min_count", 1))
                .param(count_param("max_count", 5))
                .param(
                    ParameterDef::new("pool", ParamType::StringList)
                        .describe("Sample elements from this list instead of a generator"),
                )
                .param(
                    ParameterDef::new("unique", ParamType::Bool)
                        .describe("Never repeat a pool element")
                        .default_value(false),
                ),
            array,
        );
}

fn count_param(name: &str, default: i64) -> ParameterDef {
    ParameterDef::new(name, ParamType::Int)
        .describe("Element count bound (inclusive)")
        .default_value(default)
        .min(0)
        .max(10_000)
}

/// Split `key:generator` or `key:industry/generator`.
fn parse_field(spec: &str) -> Option<(&str, &str, &str)> {
    let (key, target) = spec.split_once(':')?;
    let (industry, name) = target.split_once('/').unwrap_or((BASE, target));
    let (key, industry, name) = (key.trim(), industry.trim(), name.trim());
    if key.is_empty() || industry.is_empty() || name.is_empty() {
        return None;
    }
    Some((key, industry, name))
}

fn embedded(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let fields: Vec<&str> = p
        .get("fields")
        .and_then(Value::as_list)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut doc = BTreeMap::new();
    for spec in fields {
        let (key, industry, name) = parse_field(spec).ok_or_else(|| {
            ProducerError::invalid("fields", format!("'{spec}' is not key:generator"))
        })?;
        let value = p.generate(industry, name, &ParamMap::new())?;
        doc.insert(key.to_string(), value);
    }
    Ok(Value::Map(doc))
}

/// Sample `min..=max` elements from `pool`, with repetition.
pub fn sample_array<R: Rng + ?Sized>(rng: &mut R, pool: &[&str], min: usize, max: usize) -> Vec<Value> {
    if pool.is_empty() || max == 0 {
        return Vec::new();
    }
    let length = int_in(rng, min as i64, max as i64) as usize;
    (0..length)
        .filter_map(|_| pool.choose(rng).map(|item| Value::from(*item)))
        .collect()
}

/// Sample `min..=max` distinct elements from `pool`.
pub fn unique_sample_array<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[&str],
    min: usize,
    max: usize,
) -> Vec<Value> {
    if pool.is_empty() || max == 0 {
        return Vec::new();
    }
    let effective_max = max.min(pool.len());
    let effective_min = min.min(effective_max);
    let length = int_in(rng, effective_min as i64, effective_max as i64) as usize;

    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.into_iter().take(length).map(Value::from).collect()
}

fn array(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.int_bounds("min_count", "max_count")?;
    let (min, max) = (min as usize, max as usize);

    if p.get("pool").is_some() {
        let pool = p.get_list("pool")?;
        let items = if p.flag("unique") {
            unique_sample_array(p.rand(), &pool, min, max)
        } else {
            sample_array(p.rand(), &pool, min, max)
        };
        return Ok(Value::List(items));
    }

    let industry = p.get_str("industry")?;
    let generator = p.get_str("generator")?;
    let inner: ParamMap = p
        .get("params")
        .and_then(Value::as_map)
        .cloned()
        .unwrap_or_default();

    let count = int_in(p.rand(), min as i64, max as i64);
    let mut items = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let value = p.generate(industry, generator, &inner)?;
        items.push(match value {
            Value::String(s) => Value::String(s),
            other => Value::String(other.to_string()),
        });
    }
    Ok(Value::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use synth_core::ErrorKind;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("name:firstname"), Some(("name", "base", "firstname")));
        assert_eq!(
            parse_field("blood: health/blood_type"),
            Some(("blood", "health", "blood_type"))
        );
        assert_eq!(parse_field("nokey"), None);
        assert_eq!(parse_field(":uuid"), None);
    }

    #[test]
    fn test_sample_array() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = ["a", "b", "c"];
        for _ in 0..10 {
            let arr = sample_array(&mut rng, &pool, 1, 3);
            assert!(!arr.is_empty() && arr.len() <= 3);
        }
        assert!(sample_array(&mut rng, &[], 0, 3).is_empty());
    }

    #[test]
    fn test_unique_sample_array() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = ["a", "b", "c", "d", "e"];
        let arr = unique_sample_array(&mut rng, &pool, 3, 3);
        assert_eq!(arr.len(), 3);
        let mut seen: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_array_of_generator() {
        let mut engine = Engine::new(EngineConfig::new().with_seed(3)).unwrap();
        let mut p = ParamMap::new();
        p.insert("generator".to_string(), Value::from("number"));
        p.insert("min_count".to_string(), Value::Int(2));
        p.insert("max_count".to_string(), Value::Int(4));
        let mut inner = BTreeMap::new();
        inner.insert("min".to_string(), Value::Int(1));
        inner.insert("max".to_string(), Value::Int(9));
        p.insert("params".to_string(), Value::Map(inner));

        let value = engine.generate("base", "array", &p).unwrap();
        let items = value.as_list().unwrap();
        assert!((2..=4).contains(&items.len()));
        for item in items {
            let n: i64 = item.as_str().unwrap().parse().unwrap();
            assert!((1..=9).contains(&n));
        }
    }

    #[test]
    fn test_array_unknown_inner_generator() {
        let mut engine = Engine::new(EngineConfig::new().with_seed(3)).unwrap();
        let mut p = ParamMap::new();
        p.insert("generator".to_string(), Value::from("nope"));
        p.insert("min_count".to_string(), Value::Int(1));
        let err = engine.generate("base", "array", &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_embedded() {
        let mut engine = Engine::new(EngineConfig::new().with_seed(3)).unwrap();
        let empty = engine.generate("base", "embedded", &ParamMap::new()).unwrap();
        assert_eq!(empty, Value::Map(BTreeMap::new()));

        let mut p = ParamMap::new();
        p.insert("fields".to_string(), Value::from("name:firstname,blood:health/blood_type"));
        let doc = engine.generate("base", "embedded", &p).unwrap();
        let map = doc.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("name"));
        assert!(map.contains_key("blood"));
    }
}

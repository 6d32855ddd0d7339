//! MongoDB-flavored producers.
//!
//! Values that have no plain JSON form are returned as relaxed Extended JSON
//! documents (`{"$binary": …}`, `{"$timestamp": …}`, …) built from `bson`
//! values, so they load back into MongoDB unchanged.

use super::identifiers::{object_id, uuid_v4, YEAR_SECS};
use super::numeric::{float_param, precision_param};
use super::time::time_between;
use super::{float_in, int_in, pick, random_bytes};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use crate::vocab;
use bson::spec::BinarySubtype;
use bson::{Binary, Bson};
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

const MONGODB: &str = "mongodb";
const REGEX_FLAGS: &[char] = &['i', 'm', 's', 'x'];

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(MONGODB, "object_id", "ObjectId as 24 hex characters")
                .example("665a1f2e9c8b7a6d5e4f3a2b"),
            object_id,
        )
        .register(
            GeneratorInfo::new(MONGODB, "decimal128", "Decimal128 rounded to a precision")
                .param(float_param("min", 0.0, "Lower bound (inclusive)"))
                .param(float_param("max", 10_000.0, "Upper bound (exclusive)"))
                .param(precision_param(2)),
            decimal128,
        )
        .register(
            GeneratorInfo::new(MONGODB, "binary", "BinData with a subtype")
                .param(
                    ParameterDef::new("subtype", ParamType::Select)
                        .describe("Binary subtype")
                        .options(&["generic", "uuid", "md5", "user_defined"])
                        .default_value("generic"),
                )
                .param(
                    ParameterDef::new("length", ParamType::Int)
                        .describe("Payload bytes for generic and user_defined")
                        .default_value(16)
                        .min(0)
                        .max(1_048_576),
                ),
            binary,
        )
        .register(
            GeneratorInfo::new(MONGODB, "timestamp", "Internal timestamp (seconds, increment)"),
            timestamp,
        )
        .register(
            GeneratorInfo::new(MONGODB, "regex", "Regular expression with flags")
                .param(
                    ParameterDef::new("pattern", ParamType::String)
                        .describe("Pattern to use instead of a canned one")
                        .default_value(""),
                )
                .param(
                    ParameterDef::new("flags", ParamType::String)
                        .describe("Option letters; random when empty")
                        .default_value(""),
                ),
            regex,
        )
        .register(
            GeneratorInfo::new(MONGODB, "javascript", "JavaScript code"),
            |p| {
                let code = pick(p.rand(), vocab::JAVASCRIPT_SNIPPETS).to_string();
                Ok(extended_json(Bson::JavaScriptCode(code)))
            },
        )
        .register(
            GeneratorInfo::new(MONGODB, "date", "BSON date in the last year"),
            |p| {
                let now = p.now();
                let start = now - chrono::Duration::seconds(YEAR_SECS);
                let dt = time_between(p.rand(), start, now);
                Ok(extended_json(Bson::DateTime(bson::DateTime::from_chrono(dt))))
            },
        )
        .register(
            GeneratorInfo::new(MONGODB, "min_key", "MinKey marker"),
            |_| Ok(extended_json(Bson::MinKey)),
        )
        .register(
            GeneratorInfo::new(MONGODB, "max_key", "MaxKey marker"),
            |_| Ok(extended_json(Bson::MaxKey)),
        );
}

/// Relaxed Extended JSON form of a BSON value.
pub fn extended_json(value: Bson) -> Value {
    Value::from_json(&value.into_relaxed_extjson())
}

fn decimal128(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.float_bounds("min", "max")?;
    let precision = p.get_int("precision")? as u32;
    let raw = float_in(p.rand(), min, max, precision);
    let decimal = Decimal::from_f64_retain(raw)
        .ok_or_else(|| ProducerError::failed(format!("{raw} does not fit a decimal")))?
        .round_dp(precision);

    let mut doc = BTreeMap::new();
    doc.insert("$numberDecimal".to_string(), Value::String(decimal.to_string()));
    Ok(Value::Map(doc))
}

/// Payload and subtype for a binary subtype name.
pub fn binary_payload<R: Rng + ?Sized>(rng: &mut R, subtype: &str, length: usize) -> Binary {
    match subtype {
        "uuid" => Binary {
            subtype: BinarySubtype::Uuid,
            bytes: uuid_v4(rng).as_bytes().to_vec(),
        },
        "md5" => Binary {
            subtype: BinarySubtype::Md5,
            bytes: random_bytes(rng, 16),
        },
        "user_defined" => Binary {
            subtype: BinarySubtype::UserDefined(0x80),
            bytes: random_bytes(rng, length),
        },
        _ => Binary {
            subtype: BinarySubtype::Generic,
            bytes: random_bytes(rng, length),
        },
    }
}

fn binary(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let subtype = p.get_str("subtype")?;
    let length = p.get_int("length")? as usize;
    Ok(extended_json(Bson::Binary(binary_payload(
        p.rand(),
        subtype,
        length,
    ))))
}

fn timestamp(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let now = p.now().timestamp();
    let rng = p.rand();
    let secs = int_in(rng, now - YEAR_SECS, now);
    let time = u32::try_from(secs)
        .map_err(|_| ProducerError::failed(format!("{secs} does not fit a BSON timestamp")))?;
    let increment = rng.random_range(1..=1000u32);
    Ok(extended_json(Bson::Timestamp(bson::Timestamp {
        time,
        increment,
    })))
}

fn regex(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let custom_pattern = p.opt_str("pattern");
    let custom_flags = p.opt_str("flags");
    let rng = p.rand();

    let pattern = match custom_pattern {
        Some(pattern) => pattern.to_string(),
        None => pick(rng, vocab::REGEX_PATTERNS).to_string(),
    };
    let mut flags: Vec<char> = match custom_flags {
        Some(flags) => flags.chars().collect(),
        None => REGEX_FLAGS
            .iter()
            .copied()
            .filter(|_| rng.random_bool(0.3))
            .collect(),
    };
    flags.sort_unstable();
    flags.dedup();

    Ok(extended_json(Bson::RegularExpression(bson::Regex {
        pattern,
        options: flags.into_iter().collect(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_binary_subtypes() {
        let mut rng = StdRng::seed_from_u64(42);
        let uuid = binary_payload(&mut rng, "uuid", 3);
        assert_eq!(u8::from(uuid.subtype), 0x04);
        assert_eq!(uuid.bytes.len(), 16);

        let md5 = binary_payload(&mut rng, "md5", 3);
        assert_eq!(u8::from(md5.subtype), 0x05);
        assert_eq!(md5.bytes.len(), 16);

        let user = binary_payload(&mut rng, "user_defined", 3);
        assert_eq!(u8::from(user.subtype), 0x80);
        assert_eq!(user.bytes.len(), 3);

        let generic = binary_payload(&mut rng, "generic", 8);
        assert_eq!(u8::from(generic.subtype), 0x00);
        assert_eq!(generic.bytes.len(), 8);
    }

    #[test]
    fn test_extended_json_shapes() {
        let min_key = extended_json(Bson::MinKey);
        assert_eq!(min_key.as_map().unwrap().get("$minKey"), Some(&Value::Int(1)));

        let ts = extended_json(Bson::Timestamp(bson::Timestamp {
            time: 10,
            increment: 2,
        }));
        let inner = ts.as_map().unwrap().get("$timestamp").unwrap().as_map().unwrap();
        assert_eq!(inner.get("t"), Some(&Value::Int(10)));
        assert_eq!(inner.get("i"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_decimal128_precision() {
        use crate::engine::{Engine, EngineConfig};
        use synth_core::ParamMap;

        let mut engine = Engine::new(EngineConfig::new().with_seed(1)).unwrap();
        let mut p = ParamMap::new();
        p.insert("precision".to_string(), Value::Int(1));
        let v = engine.generate("mongodb", "decimal128", &p).unwrap();
        let text = v.as_map().unwrap().get("$numberDecimal").unwrap().to_string();
        let decimals = text.split_once('.').map(|(_, d)| d.len()).unwrap_or(0);
        assert!(decimals <= 1, "{text}");
    }
}

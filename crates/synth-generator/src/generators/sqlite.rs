//! SQLite textual encodings.
//!
//! SQLite has no native date or boolean storage classes; these producers
//! emit the encodings its date functions and `CHECK` conventions expect.

use super::numeric::{float, float_param, int_param, precision_param};
use super::random_bytes;
use super::text::sentence;
use crate::registry::RegistryBuilder;
use rand::Rng;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

const SQLITE: &str = "sqlite";

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            window_info("datetime", "ISO-8601 text YYYY-MM-DD HH:MM:SS")
                .example("2024-03-09 14:22:05"),
            |p| {
                let dt = p.window_time()?;
                Ok(Value::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            },
        )
        .register(
            window_info("date", "ISO-8601 text YYYY-MM-DD").example("2024-03-09"),
            |p| {
                let dt = p.window_time()?;
                Ok(Value::String(dt.format("%Y-%m-%d").to_string()))
            },
        )
        .register(
            GeneratorInfo::new(SQLITE, "blob", "BLOB as hex text")
                .example("9f2c41d07a3be815")
                .param(
                    ParameterDef::new("length", ParamType::Int)
                        .describe("Bytes")
                        .default_value(16)
                        .min(0)
                        .max(1_048_576),
                ),
            |p| {
                let length = p.get_int("length")? as usize;
                Ok(Value::String(hex::encode(random_bytes(p.rand(), length))))
            },
        )
        .register(
            GeneratorInfo::new(SQLITE, "boolean", "Boolean stored as 0 or 1")
                .example(1)
                .param(
                    ParameterDef::new("probability", ParamType::Float)
                        .describe("Probability of 1")
                        .default_value(0.5)
                        .min(0.0)
                        .max(1.0),
                ),
            |p| {
                let probability = p.get_float("probability")?;
                Ok(Value::Int(i64::from(p.rand().random_bool(probability))))
            },
        )
        .register(
            GeneratorInfo::new(SQLITE, "integer", "INTEGER")
                .param(int_param("min", 0, "Lower bound (inclusive)"))
                .param(int_param("max", 1_000_000, "Upper bound (inclusive)")),
            |p| {
                let (min, max) = p.int_bounds("min", "max")?;
                Ok(Value::Int(super::int_in(p.rand(), min, max)))
            },
        )
        .register(
            GeneratorInfo::new(SQLITE, "real", "REAL")
                .param(float_param("min", 0.0, "Lower bound (inclusive)"))
                .param(float_param("max", 1000.0, "Upper bound (exclusive)"))
                .param(precision_param(4)),
            float,
        )
        .register(
            GeneratorInfo::new(SQLITE, "text", "TEXT sentence")
                .param(
                    ParameterDef::new("words", ParamType::Int)
                        .describe("Words in the sentence")
                        .default_value(8)
                        .min(1)
                        .max(1000),
                ),
            |p| {
                let words = p.get_int("words")? as usize;
                Ok(Value::String(sentence(p.rand(), words)))
            },
        );
}

fn window_info(name: &str, description: &str) -> GeneratorInfo {
    GeneratorInfo::new(SQLITE, name, description)
        .param(
            ParameterDef::new("start", ParamType::String)
                .describe("Window start; defaults to one year before the reference time")
                .default_value(""),
        )
        .param(
            ParameterDef::new("end", ParamType::String)
                .describe("Window end; defaults to the reference time")
                .default_value(""),
        )
}

#[cfg(test)]
mod tests {
    use crate::engine::{Engine, EngineConfig};
    use chrono::NaiveDateTime;
    use synth_core::{ParamMap, Value};

    #[test]
    fn test_sqlite_encodings() {
        let mut engine = Engine::new(EngineConfig::new().with_seed(13)).unwrap();
        let none = ParamMap::new();

        let dt = engine.generate("sqlite", "datetime", &none).unwrap();
        assert!(NaiveDateTime::parse_from_str(dt.as_str().unwrap(), "%Y-%m-%d %H:%M:%S").is_ok());

        let blob = engine.generate("sqlite", "blob", &none).unwrap();
        let blob = blob.as_str().unwrap();
        assert_eq!(blob.len(), 32);
        assert!(blob.chars().all(|c| c.is_ascii_hexdigit()));

        for _ in 0..100 {
            let b = engine.generate("sqlite", "boolean", &none).unwrap();
            assert!(b == Value::Int(0) || b == Value::Int(1));
        }
    }

    #[test]
    fn test_sqlite_boolean_extremes() {
        let mut engine = Engine::new(EngineConfig::new().with_seed(13)).unwrap();
        let mut p = ParamMap::new();
        p.insert("probability".to_string(), Value::Float(1.0));
        for _ in 0..20 {
            assert_eq!(engine.generate("sqlite", "boolean", &p).unwrap(), Value::Int(1));
        }
    }

    #[test]
    fn test_sqlite_date_window() {
        let mut engine = Engine::new(EngineConfig::new().with_seed(13)).unwrap();
        let mut p = ParamMap::new();
        p.insert("start".to_string(), Value::from("2020-02-01"));
        p.insert("end".to_string(), Value::from("2020-02-01"));
        let d = engine.generate("sqlite", "date", &p).unwrap();
        assert_eq!(d, Value::from("2020-02-01"));
    }
}

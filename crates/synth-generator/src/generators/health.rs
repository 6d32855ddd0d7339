//! Health vocabulary producers.

use super::{float_in, int_in, pick, random_digits};
use super::numeric::int_param;
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use crate::vocab;
use rand::seq::IndexedRandom;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

const HEALTH: &str = "health";
const DOSAGES_MG: &[&str] = &["5", "10", "20", "25", "50", "100", "250", "500", "1000"];

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(HEALTH, "blood_type", "ABO/Rh blood type").example("O+"),
            |p| Ok(Value::from(pick(p.rand(), vocab::BLOOD_TYPES))),
        )
        .register(
            GeneratorInfo::new(HEALTH, "medication", "Generic medication name")
                .example("Metformin")
                .param(
                    ParameterDef::new("dosage", ParamType::Bool)
                        .describe("Append a dosage in mg")
                        .default_value(false),
                ),
            |p| {
                let with_dosage = p.flag("dosage");
                let rng = p.rand();
                let name = pick(rng, vocab::MEDICATIONS);
                Ok(Value::String(if with_dosage {
                    format!("{name} {} mg", pick(rng, DOSAGES_MG))
                } else {
                    name.to_string()
                }))
            },
        )
        .register(
            GeneratorInfo::new(HEALTH, "icd10_code", "ICD-10 diagnosis code")
                .example("I10")
                .param(
                    ParameterDef::new("describe", ParamType::Bool)
                        .describe("Append the diagnosis description")
                        .default_value(false),
                ),
            icd10_code,
        )
        .register(
            GeneratorInfo::new(HEALTH, "allergy", "Common allergen").example("Penicillin"),
            |p| Ok(Value::from(pick(p.rand(), vocab::ALLERGIES))),
        )
        .register(
            GeneratorInfo::new(HEALTH, "heart_rate", "Resting heart rate in bpm")
                .example(72)
                .param(int_param("min", 50, "Lower bound (inclusive)"))
                .param(int_param("max", 120, "Upper bound (inclusive)")),
            |p| {
                let (min, max) = p.int_bounds("min", "max")?;
                Ok(Value::Int(int_in(p.rand(), min, max)))
            },
        )
        .register(
            GeneratorInfo::new(HEALTH, "blood_pressure", "Systolic/diastolic in mmHg")
                .example("118/76"),
            |p| {
                let rng = p.rand();
                let systolic = int_in(rng, 90, 140);
                let diastolic = int_in(rng, 60, 90);
                Ok(Value::String(format!("{systolic}/{diastolic}")))
            },
        )
        .register(
            GeneratorInfo::new(HEALTH, "body_temperature", "Body temperature in °C")
                .example(36.8),
            |p| Ok(Value::Float(float_in(p.rand(), 36.1, 37.9, 1))),
        )
        .register(
            GeneratorInfo::new(HEALTH, "patient_id", "Medical record number")
                .example("MRN-4829137"),
            |p| Ok(Value::String(format!("MRN-{}", random_digits(p.rand(), 7)))),
        );
}

fn icd10_code(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let describe = p.flag("describe");
    let (code, description) = vocab::ICD10_CODES
        .choose(p.rand())
        .copied()
        .ok_or_else(|| ProducerError::failed("ICD-10 vocabulary is empty"))?;
    Ok(Value::String(if describe {
        format!("{code} {description}")
    } else {
        code.to_string()
    }))
}

#[cfg(test)]
mod tests {
    use crate::engine::{Engine, EngineConfig};
    use crate::vocab;
    use synth_core::ParamMap;

    #[test]
    fn test_health_values() {
        let mut engine = Engine::new(EngineConfig::new().with_seed(5)).unwrap();
        let none = ParamMap::new();

        for _ in 0..50 {
            let bt = engine.generate("health", "blood_type", &none).unwrap();
            assert!(vocab::BLOOD_TYPES.contains(&bt.as_str().unwrap()));

            let bp = engine.generate("health", "blood_pressure", &none).unwrap();
            let (sys, dia) = bp.as_str().unwrap().split_once('/').unwrap();
            assert!((90..=140).contains(&sys.parse::<i64>().unwrap()));
            assert!((60..=90).contains(&dia.parse::<i64>().unwrap()));

            let hr = engine.generate("health", "heart_rate", &none).unwrap();
            assert!((50..=120).contains(&hr.as_i64().unwrap()));
        }
    }
}

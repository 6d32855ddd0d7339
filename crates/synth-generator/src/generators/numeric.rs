//! Numeric value producers.

use super::{float_in, int_in, random_digits, BASE};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use rand::Rng;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(BASE, "number", "Random integer in [min, max]")
                .example(42)
                .param(int_param("min", 0, "Lower bound (inclusive)"))
                .param(int_param("max", 100, "Upper bound (inclusive)")),
            number,
        )
        .register(
            float_info("float", "Random float in [min, max)", 0.0, 100.0).example(57.31),
            float,
        )
        .register(
            float_info("price", "Price with cents in [min, max)", 1.0, 1000.0).example(19.99),
            float,
        )
        .register(
            GeneratorInfo::new(BASE, "bool", "Random boolean")
                .example(true)
                .param(
                    ParameterDef::new("probability", ParamType::Float)
                        .describe("Probability of true")
                        .default_value(0.5)
                        .min(0.0)
                        .max(1.0),
                ),
            |p| {
                let probability = p.get_float("probability")?;
                Ok(Value::Bool(p.rand().random_bool(probability)))
            },
        )
        .register(
            GeneratorInfo::new(BASE, "digits", "Numeric string without a leading zero")
                .example("482913")
                .param(
                    ParameterDef::new("length", ParamType::Int)
                        .describe("Number of digits")
                        .default_value(6)
                        .min(1)
                        .max(256),
                ),
            |p| {
                let length = p.get_int("length")? as usize;
                Ok(Value::String(random_digits(p.rand(), length)))
            },
        );
}

pub(crate) fn int_param(name: &str, default: i64, description: &str) -> ParameterDef {
    ParameterDef::new(name, ParamType::Int)
        .describe(description)
        .default_value(default)
}

pub(crate) fn float_param(name: &str, default: f64, description: &str) -> ParameterDef {
    ParameterDef::new(name, ParamType::Float)
        .describe(description)
        .default_value(default)
}

pub(crate) fn precision_param(default: i64) -> ParameterDef {
    ParameterDef::new("precision", ParamType::Int)
        .describe("Decimal places")
        .default_value(default)
        .min(0)
        .max(15)
}

fn float_info(name: &str, description: &str, min: f64, max: f64) -> GeneratorInfo {
    GeneratorInfo::new(BASE, name, description)
        .param(float_param("min", min, "Lower bound (inclusive)"))
        .param(float_param("max", max, "Upper bound (exclusive)"))
        .param(precision_param(2))
}

fn number(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.int_bounds("min", "max")?;
    Ok(Value::Int(int_in(p.rand(), min, max)))
}

/// Float in the declared `[min, max)` window at the declared precision.
pub(crate) fn float(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.float_bounds("min", "max")?;
    let precision = p.get_int("precision")? as u32;
    Ok(Value::Float(float_in(p.rand(), min, max, precision)))
}

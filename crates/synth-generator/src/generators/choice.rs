//! Selection producers: enums, foreign references and constants.

use super::{pick, BASE};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use rand::seq::IndexedRandom;
use synth_core::{reference_key, GeneratorInfo, ParamType, ParameterDef, Value};

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(BASE, "enum", "Uniform pick from a list of values")
                .example("active")
                .param(
                    ParameterDef::new("values", ParamType::StringList)
                        .describe("Candidate values")
                        .required()
                        .example(Value::List(vec![Value::from("active"), Value::from("inactive")])),
                ),
            |p| {
                let values = p.get_list("values")?;
                Ok(Value::from(pick(p.rand(), &values)))
            },
        )
        .register(
            GeneratorInfo::new(BASE, "foreign", "Uniform pick from values of another column")
                .param(
                    ParameterDef::new("table", ParamType::String)
                        .describe("Referenced table")
                        .required(),
                )
                .param(
                    ParameterDef::new("column", ParamType::String)
                        .describe("Referenced column")
                        .required(),
                ),
            foreign,
        )
        .register(
            GeneratorInfo::new(BASE, "constant", "The same text every time")
                .example("n/a")
                .param(
                    ParameterDef::new("value", ParamType::String)
                        .describe("Text to return")
                        .required(),
                ),
            |p| Ok(Value::from(p.get_str("value")?)),
        )
        .register(GeneratorInfo::new(BASE, "null", "Always null"), |_| {
            Ok(Value::Null)
        });
}

/// Pick a previously generated value of `table.column`.
fn foreign(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let table = p.get_str("table")?;
    let column = p.get_str("column")?;
    let candidates = p.refs().values(table, column);
    candidates
        .choose(p.rand())
        .cloned()
        .ok_or_else(|| ProducerError::MissingReference {
            key: reference_key(table, column),
        })
}

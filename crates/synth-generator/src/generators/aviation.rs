//! Aviation vocabulary producers.

use super::{int_in, pick, random_digits, random_from};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use crate::vocab;
use rand::seq::IndexedRandom;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

const AVIATION: &str = "aviation";
const REGISTRATION_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(AVIATION, "aircraft_type", "Commercial aircraft model")
                .example("Boeing 787-9"),
            |p| Ok(Value::from(pick(p.rand(), vocab::AIRCRAFT_TYPES))),
        )
        .register(
            GeneratorInfo::new(AVIATION, "airline", "Airline name or IATA designator")
                .example("Lufthansa")
                .param(
                    ParameterDef::new("code", ParamType::Bool)
                        .describe("Return the two-letter IATA designator")
                        .default_value(false),
                ),
            |p| {
                let code = p.flag("code");
                let (name, iata) = vocab::AIRLINES
                    .choose(p.rand())
                    .copied()
                    .ok_or_else(|| ProducerError::failed("airline vocabulary is empty"))?;
                Ok(Value::from(if code { iata } else { name }))
            },
        )
        .register(
            GeneratorInfo::new(AVIATION, "airport_code", "IATA airport code").example("FRA"),
            |p| Ok(Value::from(pick(p.rand(), vocab::AIRPORT_CODES))),
        )
        .register(
            GeneratorInfo::new(AVIATION, "flight_number", "Airline designator and number")
                .example("LH438"),
            flight_number,
        )
        .register(
            GeneratorInfo::new(AVIATION, "tail_number", "Aircraft registration mark")
                .example("N482QA"),
            tail_number,
        )
        .register(
            GeneratorInfo::new(AVIATION, "seat", "Cabin seat assignment")
                .example("23C")
                .param(
                    ParameterDef::new("rows", ParamType::Int)
                        .describe("Number of seat rows")
                        .default_value(40)
                        .min(1)
                        .max(99),
                )
                .param(
                    ParameterDef::new("seats_per_row", ParamType::Int)
                        .describe("Seats across")
                        .default_value(6)
                        .min(1)
                        .max(10),
                ),
            seat,
        );
}

fn flight_number(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let rng = p.rand();
    let (_, iata) = vocab::AIRLINES
        .choose(rng)
        .copied()
        .ok_or_else(|| ProducerError::failed("airline vocabulary is empty"))?;
    Ok(Value::String(format!("{iata}{}", int_in(rng, 1, 9999))))
}

fn tail_number(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let rng = p.rand();
    let prefix = pick(rng, vocab::TAIL_PREFIXES);
    let mark = if prefix == "N" {
        let digits = int_in(rng, 1, 3) as usize;
        format!(
            "N{}{}",
            random_digits(rng, digits),
            random_from(rng, REGISTRATION_LETTERS, 2)
        )
    } else {
        format!("{prefix}{}", random_from(rng, REGISTRATION_LETTERS, 4))
    };
    Ok(Value::String(mark))
}

fn seat(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let rows = p.get_int("rows")?;
    let across = p.get_int("seats_per_row")? as usize;
    let rng = p.rand();
    let row = int_in(rng, 1, rows);
    let letters = &vocab::SEAT_LETTERS[..across.min(vocab::SEAT_LETTERS.len())];
    Ok(Value::String(format!("{row}{}", pick(rng, letters))))
}

#[cfg(test)]
mod tests {
    use crate::engine::{Engine, EngineConfig};
    use crate::vocab;
    use synth_core::{ParamMap, Value};

    #[test]
    fn test_aviation_values() {
        let mut engine = Engine::new(EngineConfig::new().with_seed(11)).unwrap();
        let none = ParamMap::new();

        let code = engine.generate("aviation", "airport_code", &none).unwrap();
        assert!(vocab::AIRPORT_CODES.contains(&code.as_str().unwrap()));

        let flight = engine.generate("aviation", "flight_number", &none).unwrap();
        let flight = flight.as_str().unwrap();
        assert!(flight[..2].chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(flight[2..].chars().all(|c| c.is_ascii_digit()));

        let mut p = ParamMap::new();
        p.insert("rows".to_string(), Value::Int(1));
        p.insert("seats_per_row".to_string(), Value::Int(1));
        assert_eq!(engine.generate("aviation", "seat", &p).unwrap(), Value::from("1A"));
    }
}

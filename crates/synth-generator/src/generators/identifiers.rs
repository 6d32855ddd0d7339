//! Identifier producers: UUIDs, ObjectIds and counters.

use super::BASE;
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use rand::Rng;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};
use uuid::Uuid;

/// Seconds in the default "last year" window.
pub(crate) const YEAR_SECS: i64 = 365 * 24 * 60 * 60;

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(BASE, "uuid", "Random UUID v4")
                .example("0b7e6c1e-3a8f-4d42-9d8e-2f1a4b5c6d7e"),
            uuid,
        )
        .register(
            GeneratorInfo::new(BASE, "object_id", "MongoDB ObjectId as 24 hex characters")
                .example("665a1f2e9c8b7a6d5e4f3a2b"),
            object_id,
        )
        .register(
            counter_params(
                GeneratorInfo::new(BASE, "auto_increment", "Monotonic integer counter").example(1),
            ),
            auto_increment,
        );
}

/// Declare the `start`/`step`/`sequence` parameters of a counter.
pub(crate) fn counter_params(info: GeneratorInfo) -> GeneratorInfo {
    info.param(
        ParameterDef::new("start", ParamType::Int)
            .describe("First value")
            .default_value(1),
    )
    .param(
        ParameterDef::new("step", ParamType::Int)
            .describe("Increment between values")
            .default_value(1),
    )
    .param(
        ParameterDef::new("sequence", ParamType::String)
            .describe("Counter name; calls sharing a name share a counter"),
    )
}

/// Random UUID v4 from the given RNG.
pub fn uuid_v4<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Random ObjectId whose timestamp lies in the year before `now`.
pub fn object_id_at<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> ObjectId {
    let secs = now.timestamp() - rng.random_range(0..=YEAR_SECS);
    let secs = u32::try_from(secs.max(0)).unwrap_or(u32::MAX);
    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    rng.fill(&mut bytes[4..]);
    ObjectId::from_bytes(bytes)
}

fn uuid(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    Ok(Value::String(uuid_v4(p.rand()).to_string()))
}

pub(crate) fn object_id(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let now = p.now();
    Ok(Value::String(object_id_at(p.rand(), now).to_hex()))
}

/// Next value of a named counter.
///
/// The counter defaults to one per generator; the seeder names it after the
/// column it fills.
pub(crate) fn counter(p: &mut Params<'_>, default_key: &str) -> Result<Value, ProducerError> {
    let start = p.get_int("start")?;
    let step = p.get_int("step")?;
    let key = p.opt_str("sequence").unwrap_or(default_key);
    Ok(Value::Int(p.next_counter(key, start, step)))
}

fn auto_increment(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    counter(p, "base.auto_increment")
}

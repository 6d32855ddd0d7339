//! Text producers: random strings, lorem text and patterns.
//!
//! `pattern` supports the placeholders:
//! - `{uuid}` - random UUID
//! - `{rand:N}` - random N-digit number
//! - `{seq}` - per-pattern counter starting at 1

use super::identifiers::uuid_v4;
use super::{int_in, pick, random_digits, random_from, BASE};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use crate::transform::capitalize;
use crate::vocab;
use rand::Rng;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

const CHARSETS: &[(&str, &[u8])] = &[
    ("lowercase", b"abcdefghijklmnopqrstuvwxyz"),
    ("uppercase", b"ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
    (
        "alpha",
        b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
    ),
    (
        "alphanumeric",
        b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
    ),
    ("digits", b"0123456789"),
    ("hex", b"0123456789abcdef"),
];

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(BASE, "string", "Random string from a fixed character set")
                .example("qzmxkvbr")
                .param(length_param("min", 8))
                .param(length_param("max", 16))
                .param(
                    ParameterDef::new("charset", ParamType::Select)
                        .describe("Character set")
                        .options(&["lowercase", "uppercase", "alpha", "alphanumeric", "digits", "hex"])
                        .default_value("lowercase"),
                ),
            string,
        )
        .register(
            GeneratorInfo::new(BASE, "sentence", "Lorem ipsum sentence")
                .example("Lorem ipsum dolor sit amet.")
                .param(
                    ParameterDef::new("words", ParamType::Int)
                        .describe("Number of words")
                        .default_value(10)
                        .min(1)
                        .max(1000),
                ),
            |p| {
                let words = p.get_int("words")? as usize;
                Ok(Value::String(sentence(p.rand(), words)))
            },
        )
        .register(
            GeneratorInfo::new(BASE, "paragraph", "Several lorem ipsum sentences")
                .example("Lorem ipsum dolor sit amet. Sed do eiusmod tempor.")
                .param(
                    ParameterDef::new("sentences", ParamType::Int)
                        .describe("Number of sentences")
                        .default_value(5)
                        .min(1)
                        .max(100),
                ),
            |p| {
                let count = p.get_int("sentences")?;
                let rng = p.rand();
                let sentences: Vec<String> = (0..count)
                    .map(|_| {
                        let words = int_in(rng, 6, 14) as usize;
                        sentence(rng, words)
                    })
                    .collect();
                Ok(Value::String(sentences.join(" ")))
            },
        )
        .register(
            GeneratorInfo::new(BASE, "word", "Single lorem ipsum word").example("dolor"),
            |p| Ok(Value::from(pick(p.rand(), vocab::WORDS))),
        )
        .register(
            GeneratorInfo::new(BASE, "character", "Single lowercase letter").example("q"),
            |p| Ok(Value::String(random_from(p.rand(), CHARSETS[0].1, 1))),
        )
        .register(
            GeneratorInfo::new(BASE, "pattern", "String from a pattern with placeholders")
                .example("ORD-483920")
                .param(
                    ParameterDef::new("pattern", ParamType::String)
                        .describe("Template using {uuid}, {rand:N} and {seq}")
                        .required(),
                ),
            |p| {
                let template = p.get_str("pattern")?;
                let seq = if template.contains("{seq}") {
                    p.next_counter(&format!("base.pattern:{template}"), 1, 1)
                } else {
                    0
                };
                Ok(Value::String(expand_pattern(template, p.rand(), seq)))
            },
        );
}

fn length_param(name: &str, default: i64) -> ParameterDef {
    ParameterDef::new(name, ParamType::Int)
        .describe("Length bound (inclusive)")
        .default_value(default)
        .min(0)
        .max(1_000_000)
}

fn string(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.int_bounds("min", "max")?;
    let charset = p.get_str("charset")?;
    let alphabet = CHARSETS
        .iter()
        .find(|(name, _)| *name == charset)
        .map(|(_, chars)| *chars)
        .unwrap_or(CHARSETS[0].1);
    let rng = p.rand();
    let len = int_in(rng, min, max) as usize;
    Ok(Value::String(random_from(rng, alphabet, len)))
}

/// Capitalized sentence of `words` lorem ipsum words ending with a period.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let mut body: Vec<String> = (0..words)
        .map(|_| pick(rng, vocab::WORDS).to_string())
        .collect();
    if let Some(first) = body.first_mut() {
        *first = capitalize(first);
    }
    let mut text = body.join(" ");
    text.push('.');
    text
}

/// Expand the placeholders of a pattern.
pub fn expand_pattern<R: Rng + ?Sized>(pattern: &str, rng: &mut R, seq: i64) -> String {
    let mut result = pattern.replace("{seq}", &seq.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &uuid_v4(rng).to_string(), 1);
    }

    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}').map(|e| start + e) else {
            break;
        };
        match result[start + 6..end].parse::<usize>() {
            Ok(digits) => {
                let number = random_digits(rng, digits);
                result.replace_range(start..=end, &number);
                search_from = start + number.len();
            }
            Err(_) => search_from = end + 1,
        }
    }

    result
}

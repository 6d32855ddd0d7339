//! People, contact and address producers.

use super::{int_in, pick, random_digits, BASE};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use crate::vocab;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{};:,.?";

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            GeneratorInfo::new(BASE, "firstname", "Given name").example("Mary"),
            |p| Ok(Value::from(pick(p.rand(), vocab::FIRST_NAMES))),
        )
        .register(
            GeneratorInfo::new(BASE, "lastname", "Family name").example("Garcia"),
            |p| Ok(Value::from(pick(p.rand(), vocab::LAST_NAMES))),
        )
        .register(
            GeneratorInfo::new(BASE, "name", "Full name").example("Mary Garcia"),
            name,
        )
        .register(
            GeneratorInfo::new(BASE, "email", "Email address")
                .example("mary.garcia42@example.com")
                .param(
                    ParameterDef::new("domain", ParamType::String)
                        .describe("Domain to use instead of a random one")
                        .default_value(""),
                ),
            email,
        )
        .register(
            GeneratorInfo::new(BASE, "phone", "Phone number")
                .example("(555) 123-4567")
                .param(
                    ParameterDef::new("format", ParamType::Select)
                        .describe("Number layout")
                        .options(&["us", "international", "e164", "plain"])
                        .default_value("us"),
                ),
            phone,
        )
        .register(
            GeneratorInfo::new(BASE, "username", "Login name").example("mgarcia42"),
            username,
        )
        .register(
            GeneratorInfo::new(BASE, "password", "Random password")
                .example("aK3!x9Qm#Lp2")
                .param(
                    ParameterDef::new("length", ParamType::Int)
                        .describe("Number of characters")
                        .default_value(12)
                        .min(1)
                        .max(1024),
                )
                .param(bool_param("include_lowercase", true))
                .param(bool_param("include_uppercase", true))
                .param(bool_param("include_digits", true))
                .param(bool_param("include_symbols", true)),
            password,
        )
        .register(
            GeneratorInfo::new(BASE, "company", "Company name").example("Globex LLC"),
            |p| {
                let rng = p.rand();
                Ok(Value::String(format!(
                    "{} {}",
                    pick(rng, vocab::COMPANY_WORDS),
                    pick(rng, vocab::COMPANY_SUFFIXES)
                )))
            },
        )
        .register(
            GeneratorInfo::new(BASE, "job_title", "Job title").example("Data Analyst"),
            |p| Ok(Value::from(pick(p.rand(), vocab::JOB_TITLES))),
        )
        .register(
            GeneratorInfo::new(BASE, "city", "City name").example("Springfield"),
            |p| Ok(Value::from(pick(p.rand(), vocab::CITIES))),
        )
        .register(
            GeneratorInfo::new(BASE, "state", "US state abbreviation").example("CA"),
            |p| Ok(Value::from(pick(p.rand(), vocab::STATES))),
        )
        .register(
            GeneratorInfo::new(BASE, "country", "Country name").example("Canada"),
            |p| Ok(Value::from(pick(p.rand(), vocab::COUNTRIES))),
        )
        .register(
            GeneratorInfo::new(BASE, "street_address", "House number and street")
                .example("742 Maple Ave"),
            |p| {
                let rng = p.rand();
                let number = int_in(rng, 1, 9999);
                Ok(Value::String(format!(
                    "{number} {} {}",
                    pick(rng, vocab::STREET_NAMES),
                    pick(rng, vocab::STREET_SUFFIXES)
                )))
            },
        )
        .register(
            GeneratorInfo::new(BASE, "zip_code", "Five digit postal code").example("02139"),
            |p| Ok(Value::String(format!("{:05}", int_in(p.rand(), 501, 99950)))),
        );
}

fn bool_param(name: &str, default: bool) -> ParameterDef {
    ParameterDef::new(name, ParamType::Bool)
        .describe("Include this character class")
        .default_value(default)
}

fn name(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let rng = p.rand();
    Ok(Value::String(format!(
        "{} {}",
        pick(rng, vocab::FIRST_NAMES),
        pick(rng, vocab::LAST_NAMES)
    )))
}

fn email(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let domain = p.opt_str("domain");
    let rng = p.rand();
    let first = pick(rng, vocab::FIRST_NAMES).to_lowercase();
    let last = pick(rng, vocab::LAST_NAMES).to_lowercase();
    let number = int_in(rng, 1, 99);
    let domain = match domain {
        Some(d) => d,
        None => pick(rng, vocab::EMAIL_DOMAINS),
    };
    Ok(Value::String(format!("{first}.{last}{number}@{domain}")))
}

fn phone(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let format = p.get_str("format")?;
    let rng = p.rand();
    let area = int_in(rng, 201, 989);
    let exchange = int_in(rng, 200, 999);
    let line = random_digits(rng, 4);
    let number = match format {
        "international" => format!("+1-{area}-{exchange}-{line}"),
        "e164" => format!("+1{area}{exchange}{line}"),
        "plain" => format!("{area}{exchange}{line}"),
        _ => format!("({area}) {exchange}-{line}"),
    };
    Ok(Value::String(number))
}

fn username(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let rng = p.rand();
    let first = pick(rng, vocab::FIRST_NAMES).to_lowercase();
    let last = pick(rng, vocab::LAST_NAMES).to_lowercase();
    let number = int_in(rng, 1, 999);
    let name = if rng.random_bool(0.5) {
        format!("{}{last}{number}", first.chars().next().unwrap_or('x'))
    } else {
        format!("{first}_{last}{number}")
    };
    Ok(Value::String(name))
}

/// Random password of `length` characters drawn from the given classes.
///
/// When `length` is at least the number of classes, the result contains one
/// character from every class.
pub fn password_from<R: Rng + ?Sized>(rng: &mut R, length: usize, classes: &[&[u8]]) -> String {
    let pool: Vec<u8> = classes.iter().flat_map(|c| c.iter().copied()).collect();
    let mut chars: Vec<u8> = Vec::with_capacity(length);

    if length >= classes.len() {
        for class in classes {
            if let Some(c) = class.choose(rng) {
                chars.push(*c);
            }
        }
    }
    while chars.len() < length {
        match pool.choose(rng) {
            Some(c) => chars.push(*c),
            None => break,
        }
    }
    chars.shuffle(rng);
    chars.into_iter().map(char::from).collect()
}

fn password(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let length = usize::try_from(p.get_int("length")?)
        .map_err(|_| ProducerError::invalid("length", "must be positive"))?;

    let mut classes: Vec<&[u8]> = Vec::new();
    for (flag, class) in [
        ("include_lowercase", LOWERCASE),
        ("include_uppercase", UPPERCASE),
        ("include_digits", DIGITS),
        ("include_symbols", SYMBOLS),
    ] {
        if p.flag(flag) {
            classes.push(class);
        }
    }
    if classes.is_empty() {
        return Err(ProducerError::invalid(
            "include_lowercase",
            "at least one character class must be included",
        ));
    }

    Ok(Value::String(password_from(p.rand(), length, &classes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_password_has_every_class() {
        let mut rng = StdRng::seed_from_u64(42);
        let classes: [&[u8]; 4] = [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS];
        for _ in 0..200 {
            let pw = password_from(&mut rng, 4, &classes);
            assert_eq!(pw.len(), 4);
            assert!(pw.bytes().any(|b| LOWERCASE.contains(&b)));
            assert!(pw.bytes().any(|b| UPPERCASE.contains(&b)));
            assert!(pw.bytes().any(|b| DIGITS.contains(&b)));
            assert!(pw.bytes().any(|b| SYMBOLS.contains(&b)));
        }
    }

    #[test]
    fn test_short_password_uses_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let classes: [&[u8]; 2] = [DIGITS, UPPERCASE];
        let pw = password_from(&mut rng, 1, &classes);
        assert_eq!(pw.len(), 1);
        assert!(pw.bytes().all(|b| DIGITS.contains(&b) || UPPERCASE.contains(&b)));
    }
}

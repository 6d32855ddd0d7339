//! Producer catalog.
//!
//! Each submodule registers the producers of one domain. Shared sampling
//! helpers live here; every helper takes the RNG explicitly so producers only
//! ever draw from the engine RNG.

pub mod aggregate;
pub mod aviation;
pub mod choice;
pub mod geometry;
pub mod health;
pub mod identifiers;
pub mod mongodb;
pub mod mysql;
pub mod network;
pub mod numeric;
pub mod person;
pub mod postgres;
pub mod sqlite;
pub mod text;
pub mod time;

use crate::registry::RegistryBuilder;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Industry of the general-purpose producers.
pub const BASE: &str = "base";

/// Register every producer of the catalog.
pub fn register_all(builder: &mut RegistryBuilder) {
    identifiers::register(builder);
    person::register(builder);
    time::register(builder);
    numeric::register(builder);
    text::register(builder);
    network::register(builder);
    choice::register(builder);
    aggregate::register(builder);
    aviation::register(builder);
    health::register(builder);
    mongodb::register(builder);
    postgres::register(builder);
    mysql::register(builder);
    sqlite::register(builder);
}

/// Uniform pick from a list; empty lists yield `""`.
pub fn pick<'v, R: Rng + ?Sized>(rng: &mut R, items: &[&'v str]) -> &'v str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Random integer in `[min, max]`; `min` when the range is inverted.
pub fn int_in<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if min >= max {
        min
    } else {
        rng.random_range(min..=max)
    }
}

/// Random float in `[min, max)` rounded to `precision` decimals.
///
/// Rounding never leaves the half-open interval: a value that rounds up to
/// `max` is replaced by the largest grid point below it, and one that falls
/// under `min` is clamped to `min`. `min == max` yields `min`.
pub fn float_in<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, precision: u32) -> f64 {
    if min >= max {
        return min;
    }
    let raw = rng.random_range(min..max);
    let scale = 10f64.powi(precision.min(15) as i32);
    let mut value = (raw * scale).round() / scale;
    if value >= max {
        value = ((max * scale).ceil() - 1.0) / scale;
    }
    if value < min {
        value = min;
    }
    value
}

/// `n` random bytes.
pub fn random_bytes<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; n];
    rng.fill(bytes.as_mut_slice());
    bytes
}

/// A random number with exactly `digits` digits and no leading zero.
pub fn random_digits<R: Rng + ?Sized>(rng: &mut R, digits: usize) -> String {
    let mut result = String::with_capacity(digits);
    for i in 0..digits {
        let d = if i == 0 {
            rng.random_range(1..10u32)
        } else {
            rng.random_range(0..10u32)
        };
        result.push(char::from(b'0' + d as u8));
    }
    result
}

/// Random string of `len` characters drawn from `alphabet`.
pub fn random_from<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .filter_map(|_| alphabet.choose(rng).map(|b| char::from(*b)))
        .collect()
}

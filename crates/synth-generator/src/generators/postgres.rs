//! Postgres-flavored producers.
//!
//! Every value is the textual literal Postgres accepts for the type, so the
//! output can be fed to `COPY` or an `INSERT` without further conversion.

use super::geometry::{pg_point, pg_points, random_coord, random_linestring, random_polygon};
use super::identifiers::{counter, counter_params};
use super::network::{cidr, inet, mac};
use super::numeric::{float_param, int_param};
use super::time::time_between;
use super::{float_in, int_in, pick, random_bytes};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use crate::vocab;
use chrono::Duration;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::BTreeMap;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

const POSTGRES: &str = "postgres";

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(geometric("point", "Point literal (x,y)"), |p| {
            let (min, max) = p.float_bounds("min", "max")?;
            Ok(Value::String(pg_point(&random_coord(p.rand(), min, max))))
        })
        .register(geometric("line", "Infinite line {A,B,C}"), line)
        .register(geometric("lseg", "Line segment [(x1,y1),(x2,y2)]"), |p| {
            let (min, max) = p.float_bounds("min", "max")?;
            let seg = random_linestring(p.rand(), 2, min, max);
            Ok(Value::String(format!("[{}]", pg_points(seg.0.iter()))))
        })
        .register(geometric("box", "Box (x2,y2),(x1,y1) upper-right first"), pg_box)
        .register(
            geometric("path", "Open [..] or closed (..) path")
                .param(
                    ParameterDef::new("points", ParamType::Int)
                        .describe("Number of points")
                        .default_value(4)
                        .min(2)
                        .max(1000),
                )
                .param(
                    ParameterDef::new("closed", ParamType::Bool)
                        .describe("Render a closed path")
                        .default_value(false),
                ),
            path,
        )
        .register(
            geometric("polygon", "Polygon ((x1,y1),...)").param(
                ParameterDef::new("vertices", ParamType::Int)
                    .describe("Number of vertices")
                    .default_value(5)
                    .min(3)
                    .max(1000),
            ),
            polygon,
        )
        .register(geometric("circle", "Circle <(x,y),r>"), circle)
        .register(
            GeneratorInfo::new(POSTGRES, "range", "Range literal [lo,hi)")
                .example("[12,480)")
                .param(
                    ParameterDef::new("subtype", ParamType::Select)
                        .describe("Range type")
                        .options(vocab::PG_RANGE_SUBTYPES)
                        .default_value("int4range"),
                ),
            range,
        )
        .register(
            GeneratorInfo::new(POSTGRES, "hstore", "hstore key/value pairs")
                .example("\"color\"=>\"amber\", \"size\"=>\"large\"")
                .param(
                    ParameterDef::new("keys", ParamType::Int)
                        .describe("Number of pairs")
                        .default_value(3)
                        .min(0)
                        .max(100),
                ),
            hstore,
        )
        .register(
            GeneratorInfo::new(POSTGRES, "tsvector", "Sorted, deduplicated lexemes")
                .example("'amber' 'river' 'stone'")
                .param(
                    ParameterDef::new("words", ParamType::Int)
                        .describe("Number of lexemes drawn")
                        .default_value(5)
                        .min(1)
                        .max(1000),
                ),
            tsvector,
        )
        .register(
            GeneratorInfo::new(POSTGRES, "tsquery", "Full-text query")
                .example("'amber' & 'river'"),
            tsquery,
        )
        .register(
            GeneratorInfo::new(POSTGRES, "bit", "Fixed-width bit string")
                .example("10110010")
                .param(
                    ParameterDef::new("length", ParamType::Int)
                        .describe("Bits")
                        .default_value(8)
                        .min(1)
                        .max(4096),
                ),
            |p| {
                let length = p.get_int("length")? as usize;
                Ok(Value::String(bits(p.rand(), length)))
            },
        )
        .register(
            GeneratorInfo::new(POSTGRES, "varbit", "Variable-width bit string")
                .example("1011")
                .param(
                    ParameterDef::new("max_length", ParamType::Int)
                        .describe("Maximum bits")
                        .default_value(16)
                        .min(1)
                        .max(4096),
                ),
            |p| {
                let max = p.get_int("max_length")?;
                let rng = p.rand();
                let length = int_in(rng, 1, max) as usize;
                Ok(Value::String(bits(rng, length)))
            },
        )
        .register(
            GeneratorInfo::new(POSTGRES, "bytea", "Hex-escaped bytes")
                .example("\\x1f8b0800")
                .param(
                    ParameterDef::new("length", ParamType::Int)
                        .describe("Bytes")
                        .default_value(8)
                        .min(0)
                        .max(1_048_576),
                ),
            |p| {
                let length = p.get_int("length")? as usize;
                let bytes = random_bytes(p.rand(), length);
                Ok(Value::String(format!("\\x{}", hex::encode(&bytes))))
            },
        )
        .register(
            GeneratorInfo::new(POSTGRES, "inet", "Host address with netmask"),
            |p| Ok(Value::String(inet(p.rand()))),
        )
        .register(
            GeneratorInfo::new(POSTGRES, "cidr", "Network address"),
            |p| Ok(Value::String(cidr(p.rand()))),
        )
        .register(
            GeneratorInfo::new(POSTGRES, "macaddr", "MAC address"),
            |p| Ok(Value::String(mac(p.rand()))),
        )
        .register(
            GeneratorInfo::new(POSTGRES, "money", "Currency amount")
                .example("$1,234.56")
                .param(float_param("min", 0.0, "Lower bound (inclusive)"))
                .param(float_param("max", 10_000.0, "Upper bound (exclusive)")),
            |p| {
                let (min, max) = p.float_bounds("min", "max")?;
                Ok(Value::String(money(float_in(p.rand(), min, max, 2))))
            },
        )
        .register(
            GeneratorInfo::new(POSTGRES, "interval", "Interval literal")
                .example("3 days 04:05:06")
                .param(int_param("max_days", 30, "Upper bound on the day part").min(0).max(36_500)),
            interval,
        )
        .register(
            GeneratorInfo::new(POSTGRES, "json", "Small JSON document as text")
                .example("{\"active\":true,\"id\":42,\"tag\":\"river\"}"),
            json,
        )
        .register(
            counter_params(GeneratorInfo::new(POSTGRES, "serial", "serial column value").example(1)),
            |p| counter(p, "postgres.serial"),
        );
}

fn geometric(name: &str, description: &str) -> GeneratorInfo {
    GeneratorInfo::new(POSTGRES, name, description)
        .param(float_param("min", -100.0, "Lower coordinate bound"))
        .param(float_param("max", 100.0, "Upper coordinate bound"))
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

fn line(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.float_bounds("min", "max")?;
    let rng = p.rand();
    let a = random_coord(rng, min, max);
    let mut b = random_coord(rng, min, max);
    if a == b {
        b.x += 1.0;
    }
    // Line through a and b: Ax + By + C = 0
    let coef_a = round4(b.y - a.y);
    let coef_b = round4(a.x - b.x);
    let coef_c = round4(-(coef_a * a.x + coef_b * a.y));
    Ok(Value::String(format!("{{{coef_a},{coef_b},{coef_c}}}")))
}

fn pg_box(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.float_bounds("min", "max")?;
    let rng = p.rand();
    let a = random_coord(rng, min, max);
    let b = random_coord(rng, min, max);
    Ok(Value::String(format!(
        "({},{}),({},{})",
        a.x.max(b.x),
        a.y.max(b.y),
        a.x.min(b.x),
        a.y.min(b.y)
    )))
}

fn path(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.float_bounds("min", "max")?;
    let points = p.get_int("points")? as usize;
    let closed = p.flag("closed");
    let line = random_linestring(p.rand(), points, min, max);
    let body = pg_points(line.0.iter());
    Ok(Value::String(if closed {
        format!("({body})")
    } else {
        format!("[{body}]")
    }))
}

fn polygon(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.float_bounds("min", "max")?;
    let vertices = p.get_int("vertices")? as usize;
    let shape = random_polygon(p.rand(), vertices, min, max);
    let ring = &shape.exterior().0;
    // The literal lists each vertex once; the ring repeats the first.
    let open = &ring[..ring.len().saturating_sub(1)];
    Ok(Value::String(format!("({})", pg_points(open.iter()))))
}

fn circle(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let (min, max) = p.float_bounds("min", "max")?;
    let rng = p.rand();
    let center = random_coord(rng, min, max);
    let radius = float_in(rng, 0.0, ((max - min) / 4.0).max(0.0), 4);
    Ok(Value::String(format!("<{},{radius}>", pg_point(&center))))
}

/// Range literal for one of the range subtypes.
pub fn range_literal<R: Rng + ?Sized>(
    rng: &mut R,
    subtype: &str,
    now: chrono::DateTime<chrono::Utc>,
) -> String {
    match subtype {
        "int8range" => {
            let lo = int_in(rng, -1_000_000_000_000, 1_000_000_000_000);
            let hi = lo + int_in(rng, 1, 1_000_000_000);
            format!("[{lo},{hi})")
        }
        "numrange" => {
            let lo = float_in(rng, -1000.0, 1000.0, 2);
            let hi = lo + float_in(rng, 0.01, 1000.0, 2);
            format!("[{lo},{:.2})", hi)
        }
        "daterange" => {
            let lo = time_between(rng, now - Duration::days(365), now);
            let hi = lo + Duration::days(int_in(rng, 1, 90));
            format!("[{},{})", lo.format("%Y-%m-%d"), hi.format("%Y-%m-%d"))
        }
        "tsrange" => {
            let lo = time_between(rng, now - Duration::days(365), now);
            let hi = lo + Duration::seconds(int_in(rng, 60, 7 * 24 * 3600));
            format!(
                "[\"{}\",\"{}\")",
                lo.format("%Y-%m-%d %H:%M:%S"),
                hi.format("%Y-%m-%d %H:%M:%S")
            )
        }
        _ => {
            let lo = int_in(rng, -1000, 1000);
            let hi = lo + int_in(rng, 1, 1000);
            format!("[{lo},{hi})")
        }
    }
}

fn range(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let subtype = p.get_str("subtype")?;
    let now = p.now();
    Ok(Value::String(range_literal(p.rand(), subtype, now)))
}

fn hstore(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let keys = p.get_int("keys")? as usize;
    let rng = p.rand();
    let names: Vec<&str> = vocab::WORDS.choose_multiple(rng, keys).copied().collect();
    let pairs: Vec<String> = names
        .into_iter()
        .map(|key| format!("\"{key}\"=>\"{}\"", pick(rng, vocab::WORDS)))
        .collect();
    Ok(Value::String(pairs.join(", ")))
}

fn tsvector(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let words = p.get_int("words")? as usize;
    let rng = p.rand();
    let mut lexemes: Vec<&str> = (0..words).map(|_| pick(rng, vocab::WORDS)).collect();
    lexemes.sort_unstable();
    lexemes.dedup();
    let quoted: Vec<String> = lexemes.iter().map(|w| format!("'{w}'")).collect();
    Ok(Value::String(quoted.join(" ")))
}

fn tsquery(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let rng = p.rand();
    let count = int_in(rng, 1, 3) as usize;
    let mut terms: Vec<String> = vocab::WORDS
        .choose_multiple(rng, count)
        .map(|w| format!("'{w}'"))
        .collect();
    terms.shuffle(rng);

    let mut query = String::new();
    for (i, term) in terms.into_iter().enumerate() {
        if i > 0 {
            query.push_str(if rng.random_bool(0.5) { " & " } else { " | " });
        }
        query.push_str(&term);
    }
    Ok(Value::String(query))
}

/// `length` random binary digits.
pub fn bits<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| if rng.random_bool(0.5) { '1' } else { '0' })
        .collect()
}

/// Render an amount as `$1,234.56`.
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (units, frac) = (cents / 100, cents % 100);

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

fn interval(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let max_days = p.get_int("max_days")?;
    let rng = p.rand();
    let days = int_in(rng, 0, max_days);
    let hours = int_in(rng, 0, 23);
    let minutes = int_in(rng, 0, 59);
    let seconds = int_in(rng, 0, 59);
    Ok(Value::String(format!(
        "{days} days {hours:02}:{minutes:02}:{seconds:02}"
    )))
}

fn json(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let rng = p.rand();
    let mut doc = BTreeMap::new();
    doc.insert("id".to_string(), Value::Int(int_in(rng, 1, 100_000)));
    doc.insert("tag".to_string(), Value::from(pick(rng, vocab::WORDS)));
    doc.insert("active".to_string(), Value::Bool(rng.random_bool(0.5)));
    Ok(Value::String(Value::Map(doc).to_json_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineConfig};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use synth_core::ParamMap;

    fn engine() -> Engine {
        Engine::new(EngineConfig::new().with_seed(21)).unwrap()
    }

    fn text(engine: &mut Engine, name: &str, params: &ParamMap) -> String {
        engine
            .generate("postgres", name, params)
            .unwrap()
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_money() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(0.5), "$0.50");
        assert_eq!(money(1_000_000.0), "$1,000,000.00");
        assert_eq!(money(-12.0), "-$12.00");
    }

    #[test]
    fn test_range_literals() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        for subtype in vocab::PG_RANGE_SUBTYPES {
            let literal = range_literal(&mut rng, subtype, now);
            assert!(literal.starts_with('['), "{literal}");
            assert!(literal.ends_with(')'), "{literal}");
        }

        let literal = range_literal(&mut rng, "int4range", now);
        let inner = &literal[1..literal.len() - 1];
        let (lo, hi) = inner.split_once(',').unwrap();
        assert!(lo.parse::<i64>().unwrap() < hi.parse::<i64>().unwrap());
    }

    #[test]
    fn test_geometric_forms() {
        let mut engine = engine();
        let none = ParamMap::new();

        let point = text(&mut engine, "point", &none);
        assert!(point.starts_with('(') && point.ends_with(')'));
        assert_eq!(point.matches(',').count(), 1);

        let lseg = text(&mut engine, "lseg", &none);
        assert!(lseg.starts_with("[(") && lseg.ends_with(")]"));

        let circle = text(&mut engine, "circle", &none);
        assert!(circle.starts_with("<(") && circle.ends_with('>'));

        let line = text(&mut engine, "line", &none);
        assert!(line.starts_with('{') && line.ends_with('}'));
        assert_eq!(line.matches(',').count(), 2);

        let mut p = ParamMap::new();
        p.insert("vertices".to_string(), Value::Int(4));
        let polygon = text(&mut engine, "polygon", &p);
        assert_eq!(polygon.matches('(').count(), 5);

        let mut p = ParamMap::new();
        p.insert("closed".to_string(), Value::Bool(true));
        let path = text(&mut engine, "path", &p);
        assert!(path.starts_with("((") && path.ends_with("))"));
    }

    #[test]
    fn test_box_orders_corners() {
        let mut engine = engine();
        let b = text(&mut engine, "box", &ParamMap::new());
        let nums: Vec<f64> = b
            .replace(['(', ')'], "")
            .split(',')
            .map(|n| n.parse().unwrap())
            .collect();
        assert!(nums[0] >= nums[2]);
        assert!(nums[1] >= nums[3]);
    }

    #[test]
    fn test_bits_and_bytea() {
        let mut engine = engine();
        let mut p = ParamMap::new();
        p.insert("length".to_string(), Value::Int(12));
        let bit = text(&mut engine, "bit", &p);
        assert_eq!(bit.len(), 12);
        assert!(bit.chars().all(|c| c == '0' || c == '1'));

        let mut p = ParamMap::new();
        p.insert("length".to_string(), Value::Int(4));
        let bytea = text(&mut engine, "bytea", &p);
        assert!(bytea.starts_with("\\x"));
        assert_eq!(bytea.len(), 2 + 8);
    }

    #[test]
    fn test_tsvector_sorted_unique() {
        let mut engine = engine();
        let mut p = ParamMap::new();
        p.insert("words".to_string(), Value::Int(30));
        let v = text(&mut engine, "tsvector", &p);
        let lexemes: Vec<&str> = v.split(' ').collect();
        let mut sorted = lexemes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(lexemes, sorted);
    }

    #[test]
    fn test_hstore_and_json() {
        let mut engine = engine();
        let mut p = ParamMap::new();
        p.insert("keys".to_string(), Value::Int(2));
        let h = text(&mut engine, "hstore", &p);
        assert_eq!(h.matches("=>").count(), 2);

        let j = text(&mut engine, "json", &ParamMap::new());
        let parsed: serde_json::Value = serde_json::from_str(&j).unwrap();
        assert!(parsed.get("id").is_some());
    }

    #[test]
    fn test_serial_counts() {
        let mut engine = engine();
        let none = ParamMap::new();
        let a = engine.generate("postgres", "serial", &none).unwrap();
        let b = engine.generate("postgres", "serial", &none).unwrap();
        assert_eq!(a, Value::Int(1));
        assert_eq!(b, Value::Int(2));
    }
}

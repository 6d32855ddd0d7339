//! MySQL-flavored producers: spatial WKT, width-limited integers and the
//! string-backed column types.

use super::geometry::{
    random_linestring, random_multipoint, random_point, random_polygon, wkt_linestring,
    wkt_multipoint, wkt_point, wkt_polygon,
};
use super::numeric::{float_param, precision_param};
use super::text::sentence;
use super::{float_in, int_in, random_from};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use rand::seq::IndexedRandom;
use rand::Rng;
use rust_decimal::Decimal;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

const MYSQL: &str = "mysql";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Signed and unsigned ranges of the integer column types.
const INTEGER_TYPES: &[(&str, (i64, i64), (i64, i64))] = &[
    ("tinyint", (-128, 127), (0, 255)),
    ("smallint", (-32_768, 32_767), (0, 65_535)),
    ("mediumint", (-8_388_608, 8_388_607), (0, 16_777_215)),
    ("int", (-2_147_483_648, 2_147_483_647), (0, 4_294_967_295)),
    // Unsigned bigint is capped at i64::MAX; values are carried as i64.
    ("bigint", (i64::MIN, i64::MAX), (0, i64::MAX)),
];

const SPATIAL_KINDS: &[&str] = &["point", "linestring", "polygon", "multipoint"];

pub fn register(builder: &mut RegistryBuilder) {
    for kind in SPATIAL_KINDS {
        builder.register(
            spatial_info(kind).param(
                ParameterDef::new("points", ParamType::Int)
                    .describe("Points or vertices of multi-point shapes")
                    .default_value(4)
                    .min(3)
                    .max(1000),
            ),
            move |p| spatial(p, kind),
        );
    }
    builder.register(
        spatial_info("geometry").param(
            ParameterDef::new("points", ParamType::Int)
                .describe("Points or vertices of multi-point shapes")
                .default_value(4)
                .min(3)
                .max(1000),
        ),
        |p| {
            let kind = SPATIAL_KINDS.choose(p.rand()).copied().unwrap_or("point");
            spatial(p, kind)
        },
    );

    for (name, signed, unsigned) in INTEGER_TYPES {
        let (signed, unsigned) = (*signed, *unsigned);
        builder.register(
            GeneratorInfo::new(MYSQL, *name, format!("{} within its column width", name.to_uppercase()))
                .example(signed.1.min(100))
                .param(
                    ParameterDef::new("unsigned", ParamType::Bool)
                        .describe("Use the UNSIGNED range")
                        .default_value(false),
                ),
            move |p| {
                let (min, max) = if p.flag("unsigned") { unsigned } else { signed };
                Ok(Value::Int(int_in(p.rand(), min, max)))
            },
        );
    }

    builder
        .register(
            GeneratorInfo::new(MYSQL, "decimal", "DECIMAL(precision, scale) as text")
                .example("1234.56")
                .param(
                    ParameterDef::new("precision", ParamType::Int)
                        .describe("Total digits")
                        .default_value(10)
                        .min(1)
                        .max(18),
                )
                .param(
                    ParameterDef::new("scale", ParamType::Int)
                        .describe("Digits after the decimal point")
                        .default_value(2)
                        .min(0)
                        .max(18),
                ),
            decimal,
        )
        .register(
            GeneratorInfo::new(MYSQL, "double", "DOUBLE")
                .param(float_param("min", -1_000_000.0, "Lower bound (inclusive)"))
                .param(float_param("max", 1_000_000.0, "Upper bound (exclusive)"))
                .param(precision_param(6)),
            super::numeric::float,
        )
        .register(
            GeneratorInfo::new(MYSQL, "float", "Single-precision FLOAT")
                .param(float_param("min", -1000.0, "Lower bound (inclusive)"))
                .param(float_param("max", 1000.0, "Upper bound (exclusive)")),
            |p| {
                let (min, max) = p.float_bounds("min", "max")?;
                let raw = float_in(p.rand(), min, max, 4) as f32;
                Ok(Value::Float(f64::from(raw)))
            },
        )
        .register(
            GeneratorInfo::new(MYSQL, "year", "YEAR (1901-2155)").example(1987),
            |p| Ok(Value::Int(int_in(p.rand(), 1901, 2155))),
        )
        .register(
            GeneratorInfo::new(MYSQL, "enum", "One member of an ENUM")
                .param(
                    ParameterDef::new("values", ParamType::StringList)
                        .describe("Permitted members")
                        .required()
                        .example("small,medium,large"),
                ),
            |p| {
                let members = p.get_list("values")?;
                let pick = members.choose(p.rand()).copied().unwrap_or_default();
                Ok(Value::from(pick))
            },
        )
        .register(
            GeneratorInfo::new(MYSQL, "set", "Non-empty subset of a SET")
                .param(
                    ParameterDef::new("values", ParamType::StringList)
                        .describe("Permitted members")
                        .required()
                        .example("read,write,admin"),
                ),
            set,
        )
        .register(
            GeneratorInfo::new(MYSQL, "bit", "BIT(length) as an integer")
                .param(
                    ParameterDef::new("length", ParamType::Int)
                        .describe("Bits")
                        .default_value(8)
                        .min(1)
                        .max(63),
                ),
            |p| {
                let length = p.get_int("length")?;
                let max = if length >= 63 { i64::MAX } else { (1i64 << length) - 1 };
                Ok(Value::Int(int_in(p.rand(), 0, max)))
            },
        )
        .register(
            GeneratorInfo::new(MYSQL, "varchar", "VARCHAR text up to max_length")
                .param(
                    ParameterDef::new("max_length", ParamType::Int)
                        .describe("Maximum characters")
                        .default_value(255)
                        .min(1)
                        .max(65_535),
                ),
            |p| {
                let max = p.get_int("max_length")? as usize;
                let text = sentence(p.rand(), 12);
                Ok(Value::String(text.chars().take(max).collect()))
            },
        )
        .register(
            GeneratorInfo::new(MYSQL, "char", "Fixed-length CHAR")
                .param(
                    ParameterDef::new("length", ParamType::Int)
                        .describe("Characters")
                        .default_value(10)
                        .min(0)
                        .max(255),
                ),
            |p| {
                let length = p.get_int("length")? as usize;
                Ok(Value::String(random_from(p.rand(), ALPHANUMERIC, length)))
            },
        );
}

fn spatial_info(kind: &str) -> GeneratorInfo {
    GeneratorInfo::new(MYSQL, kind, format!("{} as WKT", kind.to_uppercase()))
        .param(float_param("min", -180.0, "Lower coordinate bound"))
        .param(float_param("max", 180.0, "Upper coordinate bound"))
}

fn spatial(p: &mut Params<'_>, kind: &str) -> Result<Value, ProducerError> {
    let (min, max) = p.float_bounds("min", "max")?;
    let points = p.get_int("points")? as usize;
    let rng = p.rand();
    let wkt = match kind {
        "linestring" => wkt_linestring(&random_linestring(rng, points, min, max)),
        "polygon" => wkt_polygon(&random_polygon(rng, points, min, max)),
        "multipoint" => wkt_multipoint(&random_multipoint(rng, points, min, max)),
        _ => wkt_point(&random_point(rng, min, max)),
    };
    Ok(Value::String(wkt))
}

/// DECIMAL with `precision` total digits and `scale` fractional digits.
pub fn decimal_value<R: Rng + ?Sized>(rng: &mut R, precision: u32, scale: u32) -> Decimal {
    let bound = 10i64.pow(precision) - 1;
    Decimal::new(rng.random_range(-bound..=bound), scale)
}

fn decimal(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let precision = p.get_int("precision")? as u32;
    let scale = p.get_int("scale")? as u32;
    if scale > precision {
        return Err(ProducerError::invalid(
            "scale",
            format!("scale {scale} exceeds precision {precision}"),
        ));
    }
    Ok(Value::String(decimal_value(p.rand(), precision, scale).to_string()))
}

fn set(p: &mut Params<'_>) -> Result<Value, ProducerError> {
    let members = p.get_list("values")?;
    let rng = p.rand();
    let mut chosen: Vec<&str> = members
        .iter()
        .copied()
        .filter(|_| rng.random_bool(0.5))
        .collect();
    if chosen.is_empty() {
        chosen.extend(members.choose(rng).copied());
    }
    Ok(Value::String(chosen.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use synth_core::{ErrorKind, ParamMap};

    fn engine() -> Engine {
        Engine::new(EngineConfig::new().with_seed(8)).unwrap()
    }

    #[test]
    fn test_integer_widths() {
        let mut engine = engine();
        let none = ParamMap::new();
        let mut unsigned = ParamMap::new();
        unsigned.insert("unsigned".to_string(), Value::Bool(true));

        for _ in 0..1000 {
            let v = engine.generate("mysql", "tinyint", &none).unwrap();
            assert!((-128..=127).contains(&v.as_i64().unwrap()));
            let v = engine.generate("mysql", "tinyint", &unsigned).unwrap();
            assert!((0..=255).contains(&v.as_i64().unwrap()));
            let v = engine.generate("mysql", "mediumint", &none).unwrap();
            assert!((-8_388_608..=8_388_607).contains(&v.as_i64().unwrap()));
            let v = engine.generate("mysql", "bigint", &unsigned).unwrap();
            assert!(v.as_i64().unwrap() >= 0);
        }
    }

    #[test]
    fn test_decimal_fits_precision() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let d = decimal_value(&mut rng, 5, 2);
            assert!(d.scale() == 2);
            assert!(d.abs() <= Decimal::new(99_999, 2));
        }
    }

    #[test]
    fn test_decimal_scale_beyond_precision() {
        let mut engine = engine();
        let mut p = ParamMap::new();
        p.insert("precision".to_string(), Value::Int(3));
        p.insert("scale".to_string(), Value::Int(5));
        let err = engine.generate("mysql", "decimal", &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_set_is_ordered_subset() {
        let mut engine = engine();
        let mut p = ParamMap::new();
        p.insert("values".to_string(), Value::from("a,b,c,d"));
        for _ in 0..100 {
            let v = engine.generate("mysql", "set", &p).unwrap();
            let parts: Vec<&str> = v.as_str().unwrap().split(',').collect();
            assert!(!parts.is_empty());
            let mut sorted = parts.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(parts, sorted);
        }
    }

    #[test]
    fn test_spatial_wkt() {
        let mut engine = engine();
        let none = ParamMap::new();
        let point = engine.generate("mysql", "point", &none).unwrap();
        assert!(point.as_str().unwrap().starts_with("POINT("));
        let polygon = engine.generate("mysql", "polygon", &none).unwrap();
        assert!(polygon.as_str().unwrap().starts_with("POLYGON(("));
        let any = engine.generate("mysql", "geometry", &none).unwrap();
        let any = any.as_str().unwrap();
        assert!(["POINT(", "LINESTRING(", "POLYGON((", "MULTIPOINT("]
            .iter()
            .any(|prefix| any.starts_with(prefix)));
    }

    #[test]
    fn test_char_and_year() {
        let mut engine = engine();
        let mut p = ParamMap::new();
        p.insert("length".to_string(), Value::Int(7));
        let c = engine.generate("mysql", "char", &p).unwrap();
        assert_eq!(c.as_str().unwrap().len(), 7);

        let y = engine.generate("mysql", "year", &ParamMap::new()).unwrap();
        assert!((1901..=2155).contains(&y.as_i64().unwrap()));
    }
}

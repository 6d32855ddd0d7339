//! Command-line configuration helpers.

mod size;

pub use size::{parse_byte_size, DEFAULT_MAX_OUTPUT};

use anyhow::Context;
use synth_core::{ParamMap, Value};

/// Parse one `--param key=value` pair.
///
/// The value is kept as text; the parameter schema coerces it to the
/// declared type (so `values=a,b,c` becomes a list for list parameters).
pub fn parse_param(s: &str) -> anyhow::Result<(String, Value)> {
    let (key, value) = s
        .split_once('=')
        .with_context(|| format!("Invalid parameter '{s}': expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Invalid parameter '{s}': empty key");
    }
    Ok((key.to_string(), Value::String(value.to_string())))
}

/// Collect `--param` pairs into a parameter map; later pairs win.
pub fn params_from_pairs(pairs: Vec<(String, Value)>) -> ParamMap {
    pairs.into_iter().collect()
}

/// Seed for a seed run: the `--seed` flag (or `SYNTHGEN_SEED`) first, then
/// the schema's own `seed`. `None` means system entropy.
pub fn resolve_seed(cli: Option<u64>, schema: Option<u64>) -> Option<u64> {
    cli.or(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        let (key, value) = parse_param("max=10").unwrap();
        assert_eq!(key, "max");
        assert_eq!(value, Value::String("10".to_string()));

        let (key, value) = parse_param("url=http://x/?a=b").unwrap();
        assert_eq!(key, "url");
        assert_eq!(value.as_str(), Some("http://x/?a=b"));

        let (_, value) = parse_param("prefix=").unwrap();
        assert_eq!(value.as_str(), Some(""));
    }

    #[test]
    fn test_parse_param_invalid() {
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=5").is_err());
    }

    #[test]
    fn test_later_pairs_win() {
        let params = params_from_pairs(vec![
            parse_param("min=1").unwrap(),
            parse_param("min=2").unwrap(),
        ]);
        assert_eq!(params.get("min").and_then(Value::as_str), Some("2"));
    }

    #[test]
    fn test_resolve_seed() {
        assert_eq!(resolve_seed(Some(1), Some(2)), Some(1));
        assert_eq!(resolve_seed(None, Some(2)), Some(2));
        assert_eq!(resolve_seed(None, None), None);
    }
}

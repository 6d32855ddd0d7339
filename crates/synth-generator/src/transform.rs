//! Post-transforms applied to string output.
//!
//! Order: `uppercase`, else `lowercase`, else `capitalize`; then `prefix`;
//! then `suffix`. Non-string values pass through untouched.

use synth_core::{ParamMap, Value};

fn flag(params: &ParamMap, name: &str) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(false)
}

fn text<'a>(params: &'a ParamMap, name: &str) -> &'a str {
    params.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// Apply the post-transforms named in `params` to `value`.
pub fn apply(value: Value, params: &ParamMap) -> Value {
    let Value::String(s) = value else {
        return value;
    };

    let mut out = if flag(params, "uppercase") {
        s.to_uppercase()
    } else if flag(params, "lowercase") {
        s.to_lowercase()
    } else if flag(params, "capitalize") {
        capitalize(&s)
    } else {
        s
    };

    let prefix = text(params, "prefix");
    if !prefix.is_empty() {
        out.insert_str(0, prefix);
    }
    out.push_str(text(params, "suffix"));

    Value::String(out)
}

/// Title-case every whitespace-separated token, keeping the whitespace.
pub fn capitalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_start = true;
            out.push(c);
        } else if at_start {
            at_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, Value)]) -> ParamMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_uppercase_then_prefix() {
        let p = params(&[("uppercase", Value::Bool(true)), ("prefix", Value::from(">"))]);
        assert_eq!(apply(Value::from("Ab"), &p), Value::from(">AB"));
    }

    #[test]
    fn test_uppercase_wins_over_lowercase() {
        let p = params(&[
            ("uppercase", Value::Bool(true)),
            ("lowercase", Value::Bool(true)),
        ]);
        assert_eq!(apply(Value::from("Ab"), &p), Value::from("AB"));

        let p = params(&[
            ("uppercase", Value::Bool(false)),
            ("lowercase", Value::Bool(true)),
        ]);
        assert_eq!(apply(Value::from("Ab"), &p), Value::from("ab"));
    }

    #[test]
    fn test_capitalize_keeps_whitespace() {
        assert_eq!(capitalize("hello  wORLD\tx"), "Hello  World\tX");
        let p = params(&[("capitalize", Value::Bool(true)), ("suffix", Value::from("!"))]);
        assert_eq!(apply(Value::from("new york"), &p), Value::from("New York!"));
    }

    #[test]
    fn test_non_string_untouched() {
        let p = params(&[("uppercase", Value::Bool(true)), ("prefix", Value::from("x"))]);
        assert_eq!(apply(Value::Int(5), &p), Value::Int(5));
    }
}

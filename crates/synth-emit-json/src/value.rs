//! Value → JSON conversion.

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::io;
use synth_core::{Row, Value};

/// Wrapper for JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValue(pub serde_json::Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        // Binary is base64 encoded; NaN and infinities become null.
        JsonValue(value.to_json())
    }
}

/// Pretty-printed JSON object for a row, keys in column order.
///
/// `depth` is the nesting level the object is printed at: its fields are
/// indented `depth + 1` levels and its closing brace `depth` levels.
pub fn row_to_pretty_json(row: &Row, depth: usize) -> Result<String, serde_json::Error> {
    let mut formatter = PrettyFormatter::with_indent(b"  ");
    for _ in 0..depth {
        formatter
            .begin_array(&mut io::sink())
            .map_err(serde_json::Error::io)?;
    }

    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    row.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| serde_json::Error::io(io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_row_keeps_column_order() {
        let row = Row::new().with("z", 1).with("a", "x");
        let text = row_to_pretty_json(&row, 0).unwrap();
        assert_eq!(text, "{\n  \"z\": 1,\n  \"a\": \"x\"\n}");
    }

    #[test]
    fn test_nested_values_parse_back() {
        let mut doc = BTreeMap::new();
        doc.insert("k".to_string(), Value::List(vec![Value::Int(1), Value::Null]));
        let row = Row::new()
            .with("doc", Value::Map(doc))
            .with("raw", Value::Bytes(b"hi".to_vec()));
        let text = row_to_pretty_json(&row, 1).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["doc"]["k"][0], 1);
        assert_eq!(parsed["raw"], "aGk=");
    }

    #[test]
    fn test_nested_row_indentation() {
        let mut doc = BTreeMap::new();
        doc.insert("k".to_string(), Value::Int(1));
        let row = Row::new().with("id", 1).with("doc", Value::Map(doc));
        let text = row_to_pretty_json(&row, 1).unwrap();
        assert_eq!(
            text,
            "{\n    \"id\": 1,\n    \"doc\": {\n      \"k\": 1\n    }\n  }"
        );
    }

    #[test]
    fn test_empty_row() {
        assert_eq!(row_to_pretty_json(&Row::new(), 1).unwrap(), "{}");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(
            JsonValue::from(&Value::Float(f64::NAN)).into_inner(),
            serde_json::Value::Null
        );
    }
}

//! Value → SQL literal conversion.

use synth_core::Value;

/// A rendered SQL literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlLiteral(pub String);

impl SqlLiteral {
    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Single-quote a string, doubling embedded quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Double-quote an identifier, doubling embedded double quotes.
pub fn quote_ident(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

impl From<&Value> for SqlLiteral {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => SqlLiteral("NULL".to_string()),
            Value::Bool(true) => SqlLiteral("TRUE".to_string()),
            Value::Bool(false) => SqlLiteral("FALSE".to_string()),
            Value::Int(i) => SqlLiteral(i.to_string()),
            Value::Float(f) if f.is_finite() => SqlLiteral(f.to_string()),
            Value::Float(_) => SqlLiteral("NULL".to_string()),
            Value::String(s) => SqlLiteral(quote_string(s)),
            Value::Bytes(b) => SqlLiteral(format!("X'{}'", hex::encode(b))),
            // Lists and maps as JSON text
            Value::List(_) | Value::Map(_) => SqlLiteral(quote_string(&value.to_json_string())),
        }
    }
}

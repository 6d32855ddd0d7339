//! Value → CSV field conversion.

use base64::Engine;
use synth_core::Value;

/// Wrapper for CSV field strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvValue(pub String);

impl CsvValue {
    /// Get the inner CSV string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get a reference to the inner CSV string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Value> for CsvValue {
    fn from(value: &Value) -> Self {
        match value {
            // Null - empty field
            Value::Null => CsvValue(String::new()),

            // Binary - base64 encode
            Value::Bytes(b) => CsvValue(base64::engine::general_purpose::STANDARD.encode(b)),

            // Lists and maps as compact JSON
            Value::List(_) | Value::Map(_) => CsvValue(value.to_json_string()),

            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {
                CsvValue(value.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(CsvValue::from(&Value::Null).as_str(), "");
        assert_eq!(CsvValue::from(&Value::Bool(true)).as_str(), "true");
        assert_eq!(CsvValue::from(&Value::Int(-3)).as_str(), "-3");
        assert_eq!(CsvValue::from(&Value::Float(2.5)).as_str(), "2.5");
        assert_eq!(CsvValue::from(&Value::from("a,b")).as_str(), "a,b");
    }

    #[test]
    fn test_bytes_and_nested() {
        assert_eq!(CsvValue::from(&Value::Bytes(b"hi".to_vec())).as_str(), "aGk=");
        let list = Value::List(vec![Value::Int(1), Value::from("x")]);
        assert_eq!(CsvValue::from(&list).into_inner(), r#"[1,"x"]"#);
    }
}

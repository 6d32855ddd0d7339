//! Parameter declaration, coercion and validation.
//!
//! Every generator declares the parameters it accepts through a
//! [`GeneratorInfo`]. The [`ParamSchema`] holds those declarations keyed by
//! `(industry, name)` and turns loosely-typed input (CLI strings, YAML or JSON
//! numbers) into a validated [`ParamMap`] with defaults filled in.
//!
//! Coercion is a single pass over the raw entries:
//!
//! | Declared      | Accepted raw                                          |
//! |---------------|-------------------------------------------------------|
//! | `int`         | int, float (truncated), string (empty ⇒ 0)            |
//! | `float`       | float, int, string (empty ⇒ 0.0)                      |
//! | `bool`        | bool, string (`true`/`false`/`1`/`0`, any case)       |
//! | `string`      | anything, via its textual form                        |
//! | `select`      | anything, via its textual form                        |
//! | `string-list` | list (items rendered as text), comma-separated string |

use crate::error::ErrorKind;
use crate::values::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Validated parameter map handed to producers.
pub type ParamMap = BTreeMap<String, Value>;

/// Parameter names starting with this prefix are reserved for the engine.
pub const RESERVED_PREFIX: &str = "_";

/// Names of the post-transform parameters every generator accepts.
pub const TRANSFORM_PARAMS: [&str; 5] = ["uppercase", "lowercase", "capitalize", "prefix", "suffix"];

/// Error type for parameter schema operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    /// No generator registered under this key
    #[error("Generator not found: {industry}/{name}")]
    NotFound { industry: String, name: String },

    /// A generator was registered twice
    #[error("Generator registered twice: {industry}/{name}")]
    Duplicate { industry: String, name: String },

    /// A generator declaration breaks the declaration rules
    #[error("Invalid declaration for {industry}/{name}: {message}")]
    InvalidDefinition {
        industry: String,
        name: String,
        message: String,
    },

    /// A raw value could not be converted to the declared type
    #[error("Parameter '{param}': cannot coerce {found} value '{value}' to {expected}")]
    Coercion {
        param: String,
        expected: ParamType,
        found: &'static str,
        value: String,
    },

    /// A value violates a declared constraint
    #[error("Parameter '{param}': {message}")]
    Validation { param: String, message: String },

    /// Caller tried to set an engine-reserved key
    #[error("Parameter '{param}' uses the reserved '_' prefix")]
    Reserved { param: String },
}

impl ParamError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParamError::NotFound { .. } => ErrorKind::NotFound,
            ParamError::Duplicate { .. } | ParamError::InvalidDefinition { .. } => {
                ErrorKind::Internal
            }
            ParamError::Coercion { .. }
            | ParamError::Validation { .. }
            | ParamError::Reserved { .. } => ErrorKind::Validation,
        }
    }

    fn validation(param: &str, message: impl Into<String>) -> Self {
        ParamError::Validation {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamType {
    String,
    Int,
    Float,
    Bool,
    Select,
    StringList,
}

impl ParamType {
    /// Stable textual name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Bool => "bool",
            ParamType::Select => "select",
            ParamType::StringList => "string-list",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a single generator parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDef {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
    pub default: Option<Value>,
    pub options: Vec<String>,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub example: Option<Value>,
}

impl ParameterDef {
    /// Create an optional parameter with no default.
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: String::new(),
            required: false,
            default: None,
            options: Vec::new(),
            min: None,
            max: None,
            example: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn min(mut self, value: impl Into<Value>) -> Self {
        self.min = Some(value.into());
        self
    }

    pub fn max(mut self, value: impl Into<Value>) -> Self {
        self.max = Some(value.into());
        self
    }

    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Textual form of the default, as a user would type it on the CLI.
    ///
    /// String lists render comma-joined so the text coerces back to the same
    /// list.
    pub fn default_as_text(&self) -> Option<String> {
        match &self.default {
            None | Some(Value::Null) => None,
            Some(Value::List(items)) => Some(
                items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Some(other) => Some(other.to_string()),
        }
    }

    /// Check the declaration rules for this parameter.
    fn check_definition(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("parameter with empty name".to_string());
        }
        if self.name.starts_with(RESERVED_PREFIX) {
            return Err(format!("parameter '{}' uses the reserved prefix", self.name));
        }
        if self.param_type == ParamType::Select && self.options.is_empty() {
            return Err(format!("select parameter '{}' has no options", self.name));
        }
        for (label, bound) in [("min", &self.min), ("max", &self.max)] {
            let Some(bound) = bound else { continue };
            let matches = match self.param_type {
                ParamType::Int => matches!(bound, Value::Int(_)),
                ParamType::Float => matches!(bound, Value::Float(_)),
                _ => false,
            };
            if !matches {
                return Err(format!(
                    "{label} of '{}' is {} but the parameter is {}",
                    self.name,
                    bound.type_name(),
                    self.param_type
                ));
            }
        }
        if let Some(default) = &self.default {
            coerce(self, default).map_err(|e| format!("default does not coerce: {e}"))?;
        }
        Ok(())
    }
}

/// Description of a generator and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorInfo {
    pub industry: String,
    pub name: String,
    pub description: String,
    pub example: Option<Value>,
    pub parameters: Vec<ParameterDef>,
}

impl GeneratorInfo {
    pub fn new(
        industry: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            industry: industry.into(),
            name: name.into(),
            description: description.into(),
            example: None,
            parameters: Vec::new(),
        }
    }

    /// Add a parameter declaration.
    pub fn param(mut self, def: ParameterDef) -> Self {
        self.parameters.push(def);
        self
    }

    /// Set the example output.
    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Append the post-transform parameters unless already declared.
    pub fn with_transform_params(mut self) -> Self {
        for def in transform_parameters() {
            if self.get_param(&def.name).is_none() {
                self.parameters.push(def);
            }
        }
        self
    }

    /// Get a parameter declaration by name.
    pub fn get_param(&self, name: &str) -> Option<&ParameterDef> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Check that the declaration is well formed.
    pub fn validate_definition(&self) -> Result<(), ParamError> {
        let invalid = |message: String| ParamError::InvalidDefinition {
            industry: self.industry.clone(),
            name: self.name.clone(),
            message,
        };

        if self.industry.is_empty() || self.name.is_empty() {
            return Err(invalid("empty industry or generator name".to_string()));
        }
        for (i, def) in self.parameters.iter().enumerate() {
            if self.parameters[..i].iter().any(|p| p.name == def.name) {
                return Err(invalid(format!("duplicate parameter '{}'", def.name)));
            }
            def.check_definition().map_err(invalid)?;
        }
        Ok(())
    }
}

/// Declarations of the post-transform parameters.
pub fn transform_parameters() -> Vec<ParameterDef> {
    vec![
        ParameterDef::new("uppercase", ParamType::Bool)
            .describe("Upper-case string output")
            .default_value(false),
        ParameterDef::new("lowercase", ParamType::Bool)
            .describe("Lower-case string output (ignored when uppercase is set)")
            .default_value(false),
        ParameterDef::new("capitalize", ParamType::Bool)
            .describe("Title-case each whitespace-separated token")
            .default_value(false),
        ParameterDef::new("prefix", ParamType::String)
            .describe("Text prepended to string output")
            .default_value(""),
        ParameterDef::new("suffix", ParamType::String)
            .describe("Text appended to string output")
            .default_value(""),
    ]
}

/// Coerce a raw value to the declared type of `def`.
pub fn coerce(def: &ParameterDef, raw: &Value) -> Result<Value, ParamError> {
    let fail = || ParamError::Coercion {
        param: def.name.clone(),
        expected: def.param_type,
        found: raw.type_name(),
        value: raw.to_string(),
    };

    match (def.param_type, raw) {
        (ParamType::Int, Value::Int(i)) => Ok(Value::Int(*i)),
        (ParamType::Int, Value::Float(f)) => {
            if f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Ok(Value::Int(f.trunc() as i64))
            } else {
                Err(fail())
            }
        }
        (ParamType::Int, Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(Value::Int(0))
            } else {
                s.parse::<i64>().map(Value::Int).map_err(|_| fail())
            }
        }

        (ParamType::Float, Value::Float(f)) => Ok(Value::Float(*f)),
        (ParamType::Float, Value::Int(i)) => Ok(Value::Float(*i as f64)),
        (ParamType::Float, Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(Value::Float(0.0))
            } else {
                s.parse::<f64>().map(Value::Float).map_err(|_| fail())
            }
        }

        (ParamType::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),
        (ParamType::Bool, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(fail()),
        },

        (ParamType::String | ParamType::Select, value) => Ok(Value::String(value.to_string())),

        (ParamType::StringList, Value::List(items)) => Ok(Value::List(
            items
                .iter()
                .map(|item| Value::String(item.to_string()))
                .collect(),
        )),
        (ParamType::StringList, Value::String(s)) => Ok(Value::List(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(Value::from)
                .collect(),
        )),

        _ => Err(fail()),
    }
}

/// Check type-specific constraints on an already coerced value.
fn check_constraints(def: &ParameterDef, value: &Value) -> Result<(), ParamError> {
    match def.param_type {
        ParamType::Int | ParamType::Float => {
            let Some(v) = value.as_f64() else {
                return Err(ParamError::validation(&def.name, "expected a number"));
            };
            if let Some(min) = def.min.as_ref().and_then(Value::as_f64) {
                if v < min {
                    return Err(ParamError::validation(
                        &def.name,
                        format!("value {value} is below the minimum {min}"),
                    ));
                }
            }
            if let Some(max) = def.max.as_ref().and_then(Value::as_f64) {
                if v > max {
                    return Err(ParamError::validation(
                        &def.name,
                        format!("value {value} is above the maximum {max}"),
                    ));
                }
            }
            Ok(())
        }
        ParamType::Select => {
            let text = value.as_str().unwrap_or_default();
            if def.options.iter().any(|o| o == text) {
                Ok(())
            } else {
                Err(ParamError::validation(
                    &def.name,
                    format!("'{text}' is not one of [{}]", def.options.join(", ")),
                ))
            }
        }
        ParamType::StringList => match value {
            Value::List(items) if items.iter().all(|i| matches!(i, Value::String(_))) => Ok(()),
            _ => Err(ParamError::validation(&def.name, "expected a list of strings")),
        },
        ParamType::String | ParamType::Bool => Ok(()),
    }
}

/// Registry of generator declarations keyed by `(industry, name)`.
#[derive(Debug, Clone, Default)]
pub struct ParamSchema {
    infos: BTreeMap<String, BTreeMap<String, GeneratorInfo>>,
}

impl ParamSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator declaration.
    ///
    /// Registering the same `(industry, name)` twice is an error.
    pub fn register(&mut self, info: GeneratorInfo) -> Result<(), ParamError> {
        info.validate_definition()?;
        let industry = self.infos.entry(info.industry.clone()).or_default();
        if industry.contains_key(&info.name) {
            return Err(ParamError::Duplicate {
                industry: info.industry,
                name: info.name,
            });
        }
        industry.insert(info.name.clone(), info);
        Ok(())
    }

    /// Look up a generator declaration.
    pub fn info(&self, industry: &str, name: &str) -> Result<&GeneratorInfo, ParamError> {
        self.infos
            .get(industry)
            .and_then(|generators| generators.get(name))
            .ok_or_else(|| ParamError::NotFound {
                industry: industry.to_string(),
                name: name.to_string(),
            })
    }

    /// Registered industries, sorted.
    pub fn industries(&self) -> Vec<&str> {
        self.infos.keys().map(String::as_str).collect()
    }

    /// Generators registered under an industry, sorted by name.
    pub fn generators(&self, industry: &str) -> Vec<&GeneratorInfo> {
        self.infos
            .get(industry)
            .map(|generators| generators.values().collect())
            .unwrap_or_default()
    }

    /// Total number of registered generators.
    pub fn len(&self) -> usize {
        self.infos.values().map(BTreeMap::len).sum()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the validated parameter map for a call.
    ///
    /// Defaults are applied first, then every raw entry is coerced to its
    /// declared type (undeclared entries pass through unchanged, null raw
    /// values leave the default in place). Required parameters and
    /// type-specific constraints are checked last.
    pub fn coerce_and_validate(
        &self,
        industry: &str,
        name: &str,
        raw: &ParamMap,
    ) -> Result<ParamMap, ParamError> {
        let info = self.info(industry, name)?;
        let mut params = ParamMap::new();

        for def in &info.parameters {
            if let Some(default) = &def.default {
                if !default.is_null() {
                    params.insert(def.name.clone(), coerce(def, default)?);
                }
            }
        }

        for (key, value) in raw {
            if key.starts_with(RESERVED_PREFIX) {
                return Err(ParamError::Reserved { param: key.clone() });
            }
            if value.is_null() {
                continue;
            }
            match info.get_param(key) {
                Some(def) => {
                    params.insert(key.clone(), coerce(def, value)?);
                }
                None => {
                    params.insert(key.clone(), value.clone());
                }
            }
        }

        for def in &info.parameters {
            match params.get(&def.name) {
                Some(value) => check_constraints(def, value)?,
                None if def.required => {
                    return Err(ParamError::validation(&def.name, "required parameter is missing"))
                }
                None => {}
            }
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_info() -> GeneratorInfo {
        GeneratorInfo::new("base", "number", "Random integer")
            .param(ParameterDef::new("min", ParamType::Int).default_value(0i64))
            .param(ParameterDef::new("max", ParamType::Int).default_value(100i64))
            .param(
                ParameterDef::new("precision", ParamType::Int)
                    .default_value(2i64)
                    .min(0i64)
                    .max(10i64),
            )
            .with_transform_params()
    }

    fn schema() -> ParamSchema {
        let mut schema = ParamSchema::new();
        schema.register(number_info()).unwrap();
        schema
            .register(
                GeneratorInfo::new("base", "enum", "Pick one")
                    .param(ParameterDef::new("values", ParamType::StringList).required()),
            )
            .unwrap();
        schema
            .register(
                GeneratorInfo::new("base", "phone", "Phone number").param(
                    ParameterDef::new("format", ParamType::Select)
                        .options(&["us", "international"])
                        .default_value("us"),
                ),
            )
            .unwrap();
        schema
    }

    fn raw(entries: &[(&str, Value)]) -> ParamMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let params = schema()
            .coerce_and_validate("base", "number", &ParamMap::new())
            .unwrap();
        assert_eq!(params.get("min"), Some(&Value::Int(0)));
        assert_eq!(params.get("max"), Some(&Value::Int(100)));
        assert_eq!(params.get("uppercase"), Some(&Value::Bool(false)));
        assert_eq!(params.get("prefix"), Some(&Value::from("")));
    }

    #[test]
    fn test_int_coercion() {
        let s = schema();
        let params = s
            .coerce_and_validate(
                "base",
                "number",
                &raw(&[("min", Value::from("5")), ("max", Value::Float(9.9))]),
            )
            .unwrap();
        assert_eq!(params.get("min"), Some(&Value::Int(5)));
        assert_eq!(params.get("max"), Some(&Value::Int(9)));

        let params = s
            .coerce_and_validate("base", "number", &raw(&[("min", Value::from(""))]))
            .unwrap();
        assert_eq!(params.get("min"), Some(&Value::Int(0)));

        let err = s
            .coerce_and_validate("base", "number", &raw(&[("min", Value::from("abc"))]))
            .unwrap_err();
        assert!(matches!(err, ParamError::Coercion { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_bool_coercion() {
        let def = ParameterDef::new("flag", ParamType::Bool);
        assert_eq!(coerce(&def, &Value::from("TRUE")).unwrap(), Value::Bool(true));
        assert_eq!(coerce(&def, &Value::from("0")).unwrap(), Value::Bool(false));
        assert!(coerce(&def, &Value::from("yes")).is_err());
        assert!(coerce(&def, &Value::Int(1)).is_err());
    }

    #[test]
    fn test_float_coercion() {
        let def = ParameterDef::new("ratio", ParamType::Float);
        assert_eq!(coerce(&def, &Value::Int(3)).unwrap(), Value::Float(3.0));
        assert_eq!(coerce(&def, &Value::from(" 2.5 ")).unwrap(), Value::Float(2.5));
        assert_eq!(coerce(&def, &Value::from("")).unwrap(), Value::Float(0.0));
        assert!(coerce(&def, &Value::Bool(true)).is_err());
    }

    #[test]
    fn test_string_list_coercion() {
        let def = ParameterDef::new("values", ParamType::StringList);
        assert_eq!(
            coerce(&def, &Value::from(" a, b ,c")).unwrap(),
            Value::List(vec![Value::from("a"), Value::from("b"), Value::from("c")])
        );
        assert_eq!(
            coerce(&def, &Value::List(vec![Value::Int(1), Value::from("x")])).unwrap(),
            Value::List(vec![Value::from("1"), Value::from("x")])
        );
        assert!(coerce(&def, &Value::Int(1)).is_err());
    }

    #[test]
    fn test_string_accepts_anything() {
        let def = ParameterDef::new("domain", ParamType::String);
        assert_eq!(coerce(&def, &Value::Int(42)).unwrap(), Value::from("42"));
        assert_eq!(coerce(&def, &Value::Bool(false)).unwrap(), Value::from("false"));
    }

    #[test]
    fn test_range_validation() {
        let err = schema()
            .coerce_and_validate("base", "number", &raw(&[("precision", Value::Int(11))]))
            .unwrap_err();
        assert!(matches!(err, ParamError::Validation { ref param, .. } if param == "precision"));
    }

    #[test]
    fn test_select_validation() {
        let s = schema();
        assert!(s
            .coerce_and_validate("base", "phone", &raw(&[("format", Value::from("international"))]))
            .is_ok());
        let err = s
            .coerce_and_validate("base", "phone", &raw(&[("format", Value::from("fax"))]))
            .unwrap_err();
        assert!(matches!(err, ParamError::Validation { .. }));
    }

    #[test]
    fn test_required_missing() {
        let err = schema()
            .coerce_and_validate("base", "enum", &ParamMap::new())
            .unwrap_err();
        assert!(matches!(err, ParamError::Validation { ref param, .. } if param == "values"));
    }

    #[test]
    fn test_undeclared_passes_through() {
        let params = schema()
            .coerce_and_validate("base", "number", &raw(&[("note", Value::Int(1))]))
            .unwrap();
        assert_eq!(params.get("note"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_reserved_key_rejected() {
        let err = schema()
            .coerce_and_validate("base", "number", &raw(&[("_rand", Value::Int(1))]))
            .unwrap_err();
        assert!(matches!(err, ParamError::Reserved { .. }));
    }

    #[test]
    fn test_not_found() {
        let err = schema()
            .coerce_and_validate("base", "nope", &ParamMap::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut s = schema();
        let err = s.register(number_info()).unwrap_err();
        assert!(matches!(err, ParamError::Duplicate { .. }));
    }

    #[test]
    fn test_invalid_definitions() {
        let mut s = ParamSchema::new();
        let empty_select = GeneratorInfo::new("base", "x", "")
            .param(ParameterDef::new("mode", ParamType::Select));
        assert!(s.register(empty_select).is_err());

        let mistyped_bound = GeneratorInfo::new("base", "y", "")
            .param(ParameterDef::new("n", ParamType::Int).min(0.5));
        assert!(s.register(mistyped_bound).is_err());

        let duplicate_param = GeneratorInfo::new("base", "z", "")
            .param(ParameterDef::new("n", ParamType::Int))
            .param(ParameterDef::new("n", ParamType::Int));
        assert!(s.register(duplicate_param).is_err());
    }

    #[test]
    fn test_default_text_round_trip() {
        let defs = vec![
            ParameterDef::new("n", ParamType::Int).default_value(-3i64),
            ParameterDef::new("f", ParamType::Float).default_value(0.25),
            ParameterDef::new("b", ParamType::Bool).default_value(true),
            ParameterDef::new("s", ParamType::String).default_value("example.com"),
            ParameterDef::new("m", ParamType::Select)
                .options(&["a", "b"])
                .default_value("b"),
            ParameterDef::new("l", ParamType::StringList)
                .default_value(vec![Value::from("x"), Value::from("y")]),
        ];
        for def in defs {
            let text = def.default_as_text().unwrap();
            let coerced = coerce(&def, &Value::String(text)).unwrap();
            assert_eq!(Some(&coerced), def.default.as_ref(), "round trip of {}", def.name);
        }
    }

    #[test]
    fn test_listing() {
        let s = schema();
        assert_eq!(s.industries(), vec!["base"]);
        let names: Vec<_> = s.generators("base").iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["enum", "number", "phone"]);
        assert_eq!(s.len(), 3);
        assert!(s.generators("health").is_empty());
    }
}

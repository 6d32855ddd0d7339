//! Error types for registration and generation.

use synth_core::{ErrorKind, ParamError};

/// Error returned by a producer.
#[derive(Debug, thiserror::Error)]
pub enum ProducerError {
    /// A parameter value is acceptable on its own but unusable in context
    /// (inverted bounds, empty list)
    #[error("Parameter '{param}': {message}")]
    InvalidParam { param: String, message: String },

    /// No reference values are available for a foreign key
    #[error("No reference values available for {key}")]
    MissingReference { key: String },

    /// A nested generator call failed
    #[error(transparent)]
    Nested(Box<GenerateError>),

    /// Any other producer failure
    #[error("{0}")]
    Failed(String),
}

impl ProducerError {
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        ProducerError::InvalidParam {
            param: param.to_string(),
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ProducerError::Failed(message.into())
    }
}

/// Error type for generator registration and `generate` calls.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Unknown industry or generator
    #[error("Generator not found: {industry}/{name}")]
    NotFound { industry: String, name: String },

    /// Parameters failed coercion or validation
    #[error("Invalid parameters for {industry}/{name}: {source}")]
    Validation {
        industry: String,
        name: String,
        #[source]
        source: ParamError,
    },

    /// The producer itself failed
    #[error("Generator {industry}/{name} failed: {source}")]
    Producer {
        industry: String,
        name: String,
        #[source]
        source: ProducerError,
    },

    /// A generator declaration was rejected at startup
    #[error("Registration failed: {0}")]
    Registration(ParamError),

    /// The seed environment variable does not hold an unsigned integer
    #[error("Invalid seed '{value}': expected an unsigned 64-bit integer")]
    InvalidSeed { value: String },
}

impl GenerateError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::NotFound { .. } => ErrorKind::NotFound,
            GenerateError::Validation { .. } | GenerateError::InvalidSeed { .. } => {
                ErrorKind::Validation
            }
            GenerateError::Producer {
                source: ProducerError::MissingReference { .. },
                ..
            } => ErrorKind::MissingReference,
            GenerateError::Producer { .. } => ErrorKind::Generation,
            GenerateError::Registration(_) => ErrorKind::Internal,
        }
    }

    /// Attribute a parameter schema error to a generator.
    pub(crate) fn from_param(industry: &str, name: &str, error: ParamError) -> Self {
        match error {
            ParamError::NotFound { industry, name } => GenerateError::NotFound { industry, name },
            other => GenerateError::Validation {
                industry: industry.to_string(),
                name: name.to_string(),
                source: other,
            },
        }
    }

    /// Attribute a producer error to a generator.
    ///
    /// Invalid parameters surface as validation errors and nested failures
    /// keep the classification of the inner call.
    pub(crate) fn from_producer(industry: &str, name: &str, error: ProducerError) -> Self {
        match error {
            ProducerError::Nested(inner) => *inner,
            ProducerError::InvalidParam { param, message } => GenerateError::Validation {
                industry: industry.to_string(),
                name: name.to_string(),
                source: ParamError::Validation { param, message },
            },
            other => GenerateError::Producer {
                industry: industry.to_string(),
                name: name.to_string(),
                source: other,
            },
        }
    }
}

//! User-facing error reporting for the CLI.

use std::fmt;
use synth_core::{ErrorKind, ParamError, SchemaError};
use synth_emit::EmitError;
use synth_generator::GenerateError;
use synth_seeder::SeedError;

/// An error classified for display: `error[<kind>]: <location>: <message>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub location: Option<String>,
    pub message: String,
}

impl ErrorReport {
    /// Classify an error by the first library error found in its chain.
    /// Anything unrecognized, such as a panicked seeder task, is internal.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let (kind, location) = err
            .chain()
            .find_map(classify)
            .unwrap_or((ErrorKind::Internal, None));
        Self {
            kind,
            location,
            message: chain_message(err),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

/// Causes joined with `: `, skipping causes whose text the message already
/// carries.
fn chain_message(err: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}

fn classify(err: &(dyn std::error::Error + 'static)) -> Option<(ErrorKind, Option<String>)> {
    if let Some(e) = err.downcast_ref::<SeedError>() {
        return Some((e.kind(), e.location()));
    }
    if let Some(e) = err.downcast_ref::<GenerateError>() {
        let location = match e {
            GenerateError::NotFound { industry, name }
            | GenerateError::Validation { industry, name, .. }
            | GenerateError::Producer { industry, name, .. } => Some(format!("{industry}/{name}")),
            GenerateError::Registration(_) | GenerateError::InvalidSeed { .. } => None,
        };
        return Some((e.kind(), location));
    }
    if let Some(e) = err.downcast_ref::<SchemaError>() {
        return Some((e.kind(), None));
    }
    if let Some(e) = err.downcast_ref::<ParamError>() {
        return Some((e.kind(), None));
    }
    if let Some(e) = err.downcast_ref::<EmitError>() {
        return Some((e.kind(), None));
    }
    if err.downcast_ref::<std::io::Error>().is_some() {
        return Some((ErrorKind::Io, None));
    }
    None
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: ", self.kind)?;
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        f.write_str(&self.message)
    }
}

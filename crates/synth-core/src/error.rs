//! Error classification shared by every layer of the engine.

use std::fmt;

/// Coarse error category used by adapters (CLI exit codes, HTTP statuses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown industry or generator
    NotFound,
    /// Parameter coercion, range or enumeration violation
    Validation,
    /// Duplicate columns, dangling foreign keys, FK cycles
    Schema,
    /// Foreign-key column whose parent produced no values
    MissingReference,
    /// A producer returned an error
    Generation,
    /// The run was cancelled
    Cancelled,
    /// Emitter write failure
    Io,
    /// Invariant breach
    Internal,
}

impl ErrorKind {
    /// Stable textual name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::Validation => "validation",
            ErrorKind::Schema => "schema",
            ErrorKind::MissingReference => "missing-reference",
            ErrorKind::Generation => "generation",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Io => "io",
            ErrorKind::Internal => "internal",
        }
    }

    /// Whether the error was caused by user input rather than the program.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::NotFound
                | ErrorKind::Validation
                | ErrorKind::Schema
                | ErrorKind::MissingReference
        )
    }

    /// Process exit code for the CLI: 2 for user errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_user_error() {
            2
        } else {
            1
        }
    }

    /// HTTP status used by the job service.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Validation | ErrorKind::Schema | ErrorKind::MissingReference => 400,
            ErrorKind::Cancelled => 499,
            ErrorKind::Generation | ErrorKind::Io | ErrorKind::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorKind::Validation.exit_code(), 2);
        assert_eq!(ErrorKind::Schema.exit_code(), 2);
        assert_eq!(ErrorKind::NotFound.exit_code(), 2);
        assert_eq!(ErrorKind::Io.exit_code(), 1);
        assert_eq!(ErrorKind::Internal.exit_code(), 1);
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::Schema.http_status(), 400);
        assert_eq!(ErrorKind::Cancelled.http_status(), 499);
        assert_eq!(ErrorKind::Generation.http_status(), 500);
    }
}

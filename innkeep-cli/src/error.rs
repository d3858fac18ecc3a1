//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use innkeep::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Business-rule failure (invalid record, no vacancy, bad transition, unknown record)
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::NotFound { .. } => 1,
                e if e.is_rule_violation() => 1,
                LibError::Io(_) | LibError::TransitionFailed { .. } => 5,
                LibError::Configuration(_) | LibError::Validation { .. } => 7,
                _ => 6,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innkeep::record::RecordKind;

    #[test]
    fn test_exit_codes() {
        let invalid = CliError::from(LibError::Invalid {
            kind: RecordKind::Guest,
            errors: vec!["Invalid Contact Number".to_string()],
        });
        assert_eq!(invalid.exit_code(), 1);

        let missing = CliError::from(LibError::NotFound {
            resource: "reservation X".to_string(),
        });
        assert_eq!(missing.exit_code(), 1);

        assert_eq!(CliError::InvalidArguments("x".into()).exit_code(), 4);
        assert_eq!(
            CliError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk")).exit_code(),
            5
        );
        assert_eq!(CliError::Config("bad".into()).exit_code(), 7);

        let unknown = CliError::from(LibError::UnknownField {
            kind: RecordKind::Room,
            field: "colour".to_string(),
        });
        assert_eq!(unknown.exit_code(), 6);
    }
}

//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::schema::ShapeError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/input file)
    IoError,
    /// Unknown shape name
    UnknownShape,
    /// Input did not satisfy the shape
    ValidationFailed,
    /// Server could not be started
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CLI_CONFIG_ERROR",
            Self::IoError => "CLI_IO_ERROR",
            Self::UnknownShape => "CLI_UNKNOWN_SHAPE",
            Self::ValidationFailed => "CLI_VALIDATION_FAILED",
            Self::BootFailed => "CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Validation failed with `count` violations
    pub fn validation_failed(count: usize) -> Self {
        Self::new(
            CliErrorCode::ValidationFailed,
            format!("input rejected with {} violation(s)", count),
        )
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ShapeError> for CliError {
    fn from(e: ShapeError) -> Self {
        Self::new(CliErrorCode::UnknownShape, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::validation_failed(3);
        assert_eq!(err.code(), &CliErrorCode::ValidationFailed);
        assert_eq!(err.to_string(), "CLI_VALIDATION_FAILED: input rejected with 3 violation(s)");
    }

    #[test]
    fn test_from_shape_error() {
        let err = CliError::from(ShapeError::UnknownShape("pets".into()));
        assert_eq!(err.code_str(), "CLI_UNKNOWN_SHAPE");
        assert!(err.message().contains("pets"));
    }
}

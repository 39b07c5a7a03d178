//! Validation outcome and shape error types
//!
//! Violation taxonomy (all recoverable, returned as data):
//! - missing
//! - wrong_type
//! - out_of_range
//! - not_in_enum
//!
//! `ShapeError` covers caller contract violations such as asking for a
//! shape that does not exist.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::types::{Bound, ShapeName};

/// One way a raw field failed to satisfy its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    WrongType { expected: String },
    OutOfRange { bound: Bound },
    NotInEnum { allowed: Vec<String> },
}

impl ViolationKind {
    /// Returns the stable violation code
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::Missing => "missing",
            ViolationKind::WrongType { .. } => "wrong_type",
            ViolationKind::OutOfRange { .. } => "out_of_range",
            ViolationKind::NotInEnum { .. } => "not_in_enum",
        }
    }
}

/// A field-level violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::Missing,
        }
    }

    pub fn wrong_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::WrongType {
                expected: expected.into(),
            },
        }
    }

    pub fn out_of_range(field: impl Into<String>, bound: Bound) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::OutOfRange { bound },
        }
    }

    pub fn not_in_enum(field: impl Into<String>, allowed: &[&str]) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::NotInEnum {
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "field '{}': missing", self.field),
            ViolationKind::WrongType { expected } => {
                write!(f, "field '{}': wrong type, expected {}", self.field, expected)
            }
            ViolationKind::OutOfRange { bound } => {
                write!(f, "field '{}': out of range, must be {}", self.field, bound)
            }
            ViolationKind::NotInEnum { allowed } => write!(
                f,
                "field '{}': not one of [{}]",
                self.field,
                allowed.join(", ")
            ),
        }
    }
}

/// Shape errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Malformed shape '{shape}': {reason}")]
    MalformedShape { shape: ShapeName, reason: String },
}

impl ShapeError {
    pub fn malformed(shape: ShapeName, reason: impl Into<String>) -> Self {
        ShapeError::MalformedShape {
            shape,
            reason: reason.into(),
        }
    }
}

/// Result type for shape operations
pub type ShapeResult<T> = Result<T, ShapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_codes() {
        assert_eq!(FieldViolation::missing("age").code(), "missing");
        assert_eq!(FieldViolation::wrong_type("age", "int").code(), "wrong_type");
        assert_eq!(
            FieldViolation::out_of_range("age", Bound::Lt(130)).code(),
            "out_of_range"
        );
        assert_eq!(
            FieldViolation::not_in_enum("hair_color", &["red"]).code(),
            "not_in_enum"
        );
    }

    #[test]
    fn test_violation_display() {
        let v = FieldViolation::out_of_range("age", Bound::Gt(0));
        let display = v.to_string();
        assert!(display.contains("age"));
        assert!(display.contains("> 0"));
    }

    #[test]
    fn test_violation_serialization() {
        let v = FieldViolation::out_of_range("age", Bound::Lt(130));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["field"], "age");
        assert_eq!(json["kind"], "out_of_range");
        assert_eq!(json["bound"]["op"], "lt");
        assert_eq!(json["bound"]["value"], 130);

        let v = FieldViolation::missing("first_name");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({"field": "first_name", "kind": "missing"}));
    }

    #[test]
    fn test_unknown_shape_message() {
        let err = ShapeError::UnknownShape("pets".into());
        assert_eq!(err.to_string(), "Unknown shape: pets");
    }
}

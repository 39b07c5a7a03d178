//! Record validator
//!
//! Validation semantics:
//! - Every field of the shape is checked, in shape order
//! - All violations are collected; there is no short-circuit
//! - Required fields must be present
//! - Present values are coerced to the field's semantic type
//! - Coerced values must satisfy every bound
//! - Undeclared fields are ignored
//! - Constant fields take their defined value regardless of input
//!
//! Validation is pure and deterministic. Malformed input always yields a
//! violation list, never a panic.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

use super::errors::FieldViolation;
use super::record::{FieldPresence, Record};
use super::shapes::shape;
use super::types::{FieldDef, FieldType, Requirement, Shape, ShapeName};

/// Name used for violations about the document itself.
pub const ROOT_FIELD: &str = "$root";

/// Validates raw fields against a built-in shape.
///
/// Returns the normalized record, or every violation found.
pub fn validate(
    shape_name: ShapeName,
    raw_fields: &Map<String, Value>,
) -> Result<Record, Vec<FieldViolation>> {
    validate_fields(shape(shape_name), raw_fields)
}

/// Validates an arbitrary JSON document against a built-in shape.
///
/// A document that is not an object yields a single `$root` violation.
pub fn validate_document(
    shape_name: ShapeName,
    document: &Value,
) -> Result<Record, Vec<FieldViolation>> {
    match document.as_object() {
        Some(raw) => validate(shape_name, raw),
        None => Err(vec![FieldViolation::wrong_type(ROOT_FIELD, "object")]),
    }
}

/// Builds a record of a composed shape from already validated parts.
///
/// Parts are joined in order and the first value for a field name wins.
/// The joined fields are validated against `shape_name`, so a part set
/// that does not cover the composed shape is rejected.
pub fn compose_records(
    shape_name: ShapeName,
    parts: &[&Record],
) -> Result<Record, Vec<FieldViolation>> {
    let mut raw = Map::new();
    for part in parts {
        for (name, value) in part.iter() {
            if !raw.contains_key(name) {
                raw.insert(name.to_string(), value.clone());
            }
        }
    }
    validate(shape_name, &raw)
}

pub(crate) fn validate_fields(
    shape: &Shape,
    raw: &Map<String, Value>,
) -> Result<Record, Vec<FieldViolation>> {
    let mut fields = Vec::with_capacity(shape.fields.len());
    let mut violations = Vec::new();

    for def in &shape.fields {
        match check_field(def, FieldPresence::of(raw.get(&def.name))) {
            Ok(Some(value)) => fields.push((def.name.clone(), value)),
            Ok(None) => {}
            Err(violation) => violations.push(violation),
        }
    }

    if violations.is_empty() {
        Ok(Record::new(shape.name, fields))
    } else {
        Err(violations)
    }
}

/// Checks one field. `Ok(None)` means an optional field was omitted.
fn check_field(
    def: &FieldDef,
    presence: FieldPresence<'_>,
) -> Result<Option<Value>, FieldViolation> {
    if let Requirement::Constant(value) = &def.requirement {
        return Ok(Some(value.clone()));
    }

    let raw = match presence {
        FieldPresence::Absent if def.is_required() => {
            return Err(FieldViolation::missing(&def.name))
        }
        FieldPresence::Absent => return Ok(None),
        FieldPresence::Null if def.is_required() => {
            return Err(FieldViolation::wrong_type(
                &def.name,
                def.field_type.type_name(),
            ))
        }
        FieldPresence::Null => return Ok(Some(Value::Null)),
        FieldPresence::Value(v) => v,
    };

    let value = coerce(def, raw)?;
    check_bounds(def, &value)?;
    Ok(Some(value))
}

/// Coerces a raw value to the field's semantic type.
fn coerce(def: &FieldDef, raw: &Value) -> Result<Value, FieldViolation> {
    let wrong_type = || FieldViolation::wrong_type(&def.name, def.field_type.type_name());

    match &def.field_type {
        FieldType::String => coerce_string(raw).map(Value::String).ok_or_else(wrong_type),
        FieldType::Int => coerce_int(raw)
            .map(|n| Value::Number(Number::from(n)))
            .ok_or_else(wrong_type),
        FieldType::Bool => coerce_bool(raw).map(Value::Bool).ok_or_else(wrong_type),
        FieldType::Email => match raw.as_str() {
            Some(s) if is_email(s.trim()) => Ok(Value::String(s.trim().to_string())),
            _ => Err(wrong_type()),
        },
        FieldType::Enum { kind } => {
            let s = raw.as_str().ok_or_else(wrong_type)?;
            kind.parse(s)
                .map(|canonical| Value::String(canonical.to_string()))
                .ok_or_else(|| FieldViolation::not_in_enum(&def.name, &kind.allowed()))
        }
    }
}

fn coerce_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            // Floats are accepted only when integral and representable.
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Some(f as i64)
            } else {
                None
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn coerce_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn is_email(s: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
                .expect("valid email regex")
        })
        .is_match(s)
}

/// Checks a coerced value against the field's bounds.
///
/// Reports the first bound that fails.
fn check_bounds(def: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    let failed = match value {
        Value::String(s) => {
            let len = s.chars().count();
            def.bounds.iter().find(|b| !b.admits_len(len))
        }
        Value::Number(n) => match n.as_i64() {
            Some(i) => def.bounds.iter().find(|b| !b.admits_int(i)),
            None => None,
        },
        _ => None,
    };

    match failed {
        Some(bound) => Err(FieldViolation::out_of_range(&def.name, *bound)),
        None => Ok(()),
    }
}

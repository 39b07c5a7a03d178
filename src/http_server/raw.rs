//! Helpers that turn transport-level inputs into raw field mappings.

use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};

use crate::schema::{self, FieldViolation, Record, ShapeName};

/// Converts string-valued inputs (query, path, form) into raw fields.
pub fn string_fields<I, K, V>(pairs: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect()
}

/// Reads a single header as a string, if present and valid UTF-8.
pub fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Reads a cookie by name from every `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

/// Validates one object member of a JSON body against its own shape.
///
/// Violations are reported as `<member>.<field>`. A member that is absent
/// or not an object is reported against the member name itself.
pub fn validate_member(
    body: &Value,
    member: &str,
    shape: ShapeName,
) -> Result<Record, Vec<FieldViolation>> {
    match body.get(member) {
        Some(Value::Object(fields)) => {
            schema::validate(shape, fields).map_err(|violations| prefixed(member, violations))
        }
        Some(_) => Err(vec![FieldViolation::wrong_type(member, "object")]),
        None => Err(vec![FieldViolation::missing(member)]),
    }
}

fn prefixed(member: &str, violations: Vec<FieldViolation>) -> Vec<FieldViolation> {
    violations
        .into_iter()
        .map(|mut v| {
            v.field = format!("{}.{}", member, v.field);
            v
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_cookie_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; ads=campaign-7"));
        assert_eq!(cookie_value(&headers, "ads"), Some("campaign-7".to_string()));
        assert_eq!(cookie_value(&headers, "session"), None);
    }

    #[test]
    fn test_validate_member() {
        let body = json!({"location": {"city": "Lima", "state": "Lima", "country": "Peru"}});
        let record = validate_member(&body, "location", ShapeName::Location).unwrap();
        assert_eq!(record.get_str("city"), Some("Lima"));
    }

    #[test]
    fn test_validate_member_prefixes_violations() {
        let body = json!({"location": {"state": "Lima", "country": "Peru"}});
        let violations = validate_member(&body, "location", ShapeName::Location).unwrap_err();
        assert_eq!(violations, vec![FieldViolation::missing("location.city")]);
    }

    #[test]
    fn test_validate_member_reports_bad_parts() {
        let body = json!({"person": "nope"});
        assert_eq!(
            validate_member(&body, "person", ShapeName::Person).unwrap_err(),
            vec![FieldViolation::wrong_type("person", "object")]
        );
        assert_eq!(
            validate_member(&body, "location", ShapeName::Location).unwrap_err(),
            vec![FieldViolation::missing("location")]
        );
    }

    #[test]
    fn test_string_fields() {
        let raw = string_fields([("age", "56")]);
        assert_eq!(raw["age"], json!("56"));
    }
}

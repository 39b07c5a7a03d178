//! Validated records and response shaping

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::types::ShapeName;

/// How a field appears in a record or a raw mapping.
///
/// Absence and an explicit null are distinct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldPresence<'a> {
    Absent,
    Null,
    Value(&'a Value),
}

impl<'a> FieldPresence<'a> {
    /// Classifies a lookup result.
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => FieldPresence::Absent,
            Some(Value::Null) => FieldPresence::Null,
            Some(v) => FieldPresence::Value(v),
        }
    }
}

/// A validated record conforming to a shape.
///
/// Fields keep shape order. Records are never mutated in place; shaping
/// returns a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    shape: ShapeName,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub(crate) fn new(shape: ShapeName, fields: Vec<(String, Value)>) -> Self {
        Self { shape, fields }
    }

    /// Returns the shape this record was validated against.
    pub fn shape(&self) -> ShapeName {
        self.shape
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn presence(&self, name: &str) -> FieldPresence<'_> {
        FieldPresence::of(self.get(name))
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in shape order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a copy without the named fields.
    pub fn exclude<S: AsRef<str>>(&self, names: &[S]) -> Record {
        let fields = self
            .fields
            .iter()
            .filter(|(k, _)| !names.iter().any(|n| n.as_ref() == k.as_str()))
            .cloned()
            .collect();
        Record::new(self.shape, fields)
    }

    /// Converts the record into a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

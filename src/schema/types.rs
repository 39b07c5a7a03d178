//! Shape type definitions
//!
//! A shape is a named, ordered set of field definitions. Shapes are built
//! by explicit field-set composition rather than inheritance:
//! - `Shape::compose` unions the fields of several shapes
//! - `Shape::extend` appends fields to a copy of a base shape
//!
//! Supported semantic types:
//! - string: UTF-8 string, length counted in Unicode scalar values
//! - int: 64-bit signed integer
//! - bool: Boolean
//! - email: string in `local@domain.tld` form
//! - enum: one value out of a closed set

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use super::errors::{ShapeError, ShapeResult};
use super::record::Record;

/// Allowed hair colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
    White,
    Brown,
    Black,
    Blonde,
    Red,
}

impl HairColor {
    /// Every variant, in declaration order.
    pub const ALL: [HairColor; 5] = [
        HairColor::White,
        HairColor::Brown,
        HairColor::Black,
        HairColor::Blonde,
        HairColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HairColor::White => "white",
            HairColor::Brown => "brown",
            HairColor::Black => "black",
            HairColor::Blonde => "blonde",
            HairColor::Red => "red",
        }
    }
}

impl FromStr for HairColor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HairColor::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for HairColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed enumerations a field may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumKind {
    HairColor,
}

impl EnumKind {
    /// Returns the allowed values, in declaration order.
    pub fn allowed(&self) -> Vec<&'static str> {
        match self {
            EnumKind::HairColor => HairColor::ALL.iter().map(HairColor::as_str).collect(),
        }
    }

    /// Maps a raw string to its canonical value, if it is a member.
    pub fn parse(&self, raw: &str) -> Option<&'static str> {
        match self {
            EnumKind::HairColor => raw.parse::<HairColor>().ok().map(|c| c.as_str()),
        }
    }
}

/// Semantic type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    Bool,
    Email,
    Enum { kind: EnumKind },
}

impl FieldType {
    /// Returns the type name for violation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Email => "email",
            FieldType::Enum { .. } => "enum",
        }
    }
}

/// A numeric or length bound.
///
/// Length bounds apply to string-like fields, comparison bounds to ints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Bound {
    MinLength(usize),
    MaxLength(usize),
    Gt(i64),
    Ge(i64),
    Lt(i64),
    Le(i64),
}

impl Bound {
    /// Checks a string length against a length bound.
    ///
    /// Comparison bounds never reject a length.
    pub fn admits_len(&self, len: usize) -> bool {
        match *self {
            Bound::MinLength(min) => len >= min,
            Bound::MaxLength(max) => len <= max,
            _ => true,
        }
    }

    /// Checks an integer against a comparison bound.
    ///
    /// Length bounds never reject an integer.
    pub fn admits_int(&self, n: i64) -> bool {
        match *self {
            Bound::Gt(limit) => n > limit,
            Bound::Ge(limit) => n >= limit,
            Bound::Lt(limit) => n < limit,
            Bound::Le(limit) => n <= limit,
            _ => true,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::MinLength(n) => write!(f, "length >= {}", n),
            Bound::MaxLength(n) => write!(f, "length <= {}", n),
            Bound::Gt(n) => write!(f, "> {}", n),
            Bound::Ge(n) => write!(f, ">= {}", n),
            Bound::Lt(n) => write!(f, "< {}", n),
            Bound::Le(n) => write!(f, "<= {}", n),
        }
    }
}

/// Whether a field must be supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Requirement {
    Required,
    /// May be omitted; no default is filled in.
    Optional,
    /// Fixed at definition time; supplied values are ignored.
    Constant(Value),
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    pub requirement: Requirement,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<Bound>,
}

impl FieldDef {
    fn new(name: impl Into<String>, field_type: FieldType, requirement: Requirement) -> Self {
        Self {
            name: name.into(),
            field_type,
            requirement,
            bounds: Vec::new(),
        }
    }

    /// Create a required string field
    pub fn required_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, Requirement::Required)
    }

    /// Create an optional string field
    pub fn optional_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, Requirement::Optional)
    }

    /// Create a required int field
    pub fn required_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int, Requirement::Required)
    }

    /// Create an optional int field
    pub fn optional_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int, Requirement::Optional)
    }

    /// Create an optional bool field
    pub fn optional_bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Bool, Requirement::Optional)
    }

    /// Create a required email field
    pub fn required_email(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Email, Requirement::Required)
    }

    /// Create an optional enumerated field
    pub fn optional_enum(name: impl Into<String>, kind: EnumKind) -> Self {
        Self::new(name, FieldType::Enum { kind }, Requirement::Optional)
    }

    /// Create a constant bool field
    pub fn constant_bool(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, FieldType::Bool, Requirement::Constant(Value::Bool(value)))
    }

    /// Restrict string length to `min..=max`.
    pub fn length(self, min: usize, max: usize) -> Self {
        self.with_bound(Bound::MinLength(min))
            .with_bound(Bound::MaxLength(max))
    }

    pub fn min_length(self, min: usize) -> Self {
        self.with_bound(Bound::MinLength(min))
    }

    pub fn gt(self, limit: i64) -> Self {
        self.with_bound(Bound::Gt(limit))
    }

    pub fn ge(self, limit: i64) -> Self {
        self.with_bound(Bound::Ge(limit))
    }

    pub fn lt(self, limit: i64) -> Self {
        self.with_bound(Bound::Lt(limit))
    }

    pub fn le(self, limit: i64) -> Self {
        self.with_bound(Bound::Le(limit))
    }

    fn with_bound(mut self, bound: Bound) -> Self {
        self.bounds.push(bound);
        self
    }

    pub fn is_required(&self) -> bool {
        self.requirement == Requirement::Required
    }
}

/// Names of the built-in shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeName {
    Person,
    Location,
    UserInfo,
    ExpertPerson,
    PersonQuery,
    PersonId,
    LoginForm,
    ContactForm,
}

impl ShapeName {
    pub const ALL: [ShapeName; 8] = [
        ShapeName::Person,
        ShapeName::Location,
        ShapeName::UserInfo,
        ShapeName::ExpertPerson,
        ShapeName::PersonQuery,
        ShapeName::PersonId,
        ShapeName::LoginForm,
        ShapeName::ContactForm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeName::Person => "person",
            ShapeName::Location => "location",
            ShapeName::UserInfo => "user_info",
            ShapeName::ExpertPerson => "expert_person",
            ShapeName::PersonQuery => "person_query",
            ShapeName::PersonId => "person_id",
            ShapeName::LoginForm => "login_form",
            ShapeName::ContactForm => "contact_form",
        }
    }
}

impl FromStr for ShapeName {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ShapeError::UnknownShape(s.to_string()))
    }
}

impl fmt::Display for ShapeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, ordered set of field definitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub name: ShapeName,
    pub fields: Vec<FieldDef>,
}

impl Shape {
    pub fn new(name: ShapeName, fields: Vec<FieldDef>) -> Self {
        Self { name, fields }
    }

    /// Unions the fields of `parts`, in order.
    ///
    /// On a name clash the first definition is kept; built-in shapes are
    /// checked for clashes by `validate_structure`.
    pub fn compose(name: ShapeName, parts: &[&Shape]) -> Self {
        let mut fields: Vec<FieldDef> = Vec::new();
        for part in parts {
            for field in &part.fields {
                if fields.iter().all(|f| f.name != field.name) {
                    fields.push(field.clone());
                }
            }
        }
        Self { name, fields }
    }

    /// Returns a copy of `base` with `extra` appended.
    pub fn extend(name: ShapeName, base: &Shape, extra: Vec<FieldDef>) -> Self {
        let mut shape = Self::compose(name, &[base]);
        for field in extra {
            if shape.field(&field.name).is_none() {
                shape.fields.push(field);
            }
        }
        shape
    }

    /// Looks up a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterates over field names in shape order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validates the shape definition itself (not a record)
    pub fn validate_structure(&self) -> ShapeResult<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ShapeError::malformed(
                    self.name,
                    format!("duplicate field '{}'", field.name),
                ));
            }

            let length_bounds = field
                .bounds
                .iter()
                .any(|b| matches!(b, Bound::MinLength(_) | Bound::MaxLength(_)));
            let numeric_bounds = field
                .bounds
                .iter()
                .any(|b| matches!(b, Bound::Gt(_) | Bound::Ge(_) | Bound::Lt(_) | Bound::Le(_)));

            let string_like = matches!(field.field_type, FieldType::String | FieldType::Email);
            if length_bounds && !string_like {
                return Err(ShapeError::malformed(
                    self.name,
                    format!("length bound on non-string field '{}'", field.name),
                ));
            }
            if numeric_bounds && field.field_type != FieldType::Int {
                return Err(ShapeError::malformed(
                    self.name,
                    format!("numeric bound on non-int field '{}'", field.name),
                ));
            }
        }
        Ok(())
    }

    /// Validates raw fields against this shape.
    pub fn validate(
        &self,
        raw: &serde_json::Map<String, Value>,
    ) -> Result<Record, Vec<super::FieldViolation>> {
        super::validator::validate_fields(self, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Shape {
        Shape::new(
            ShapeName::Location,
            vec![
                FieldDef::required_string("city"),
                FieldDef::required_string("state"),
            ],
        )
    }

    #[test]
    fn test_compose_keeps_order() {
        let other = Shape::new(ShapeName::PersonId, vec![FieldDef::required_int("person_id")]);
        let composed = Shape::compose(ShapeName::UserInfo, &[&base(), &other]);
        let names: Vec<_> = composed.field_names().collect();
        assert_eq!(names, vec!["city", "state", "person_id"]);
    }

    #[test]
    fn test_extend_does_not_touch_base() {
        let base = base();
        let extended = Shape::extend(
            ShapeName::ExpertPerson,
            &base,
            vec![FieldDef::constant_bool("flag", true)],
        );
        assert_eq!(base.fields.len(), 2);
        assert_eq!(extended.fields.len(), 3);
        assert!(extended.field("flag").is_some());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let shape = Shape::new(
            ShapeName::Location,
            vec![
                FieldDef::required_string("city"),
                FieldDef::required_string("city"),
            ],
        );
        let err = shape.validate_structure().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_validate_ad_hoc_shape() {
        let raw = serde_json::json!({ "city": "Lima" });
        let violations = base().validate(raw.as_object().unwrap()).unwrap_err();
        assert_eq!(violations, vec![crate::schema::FieldViolation::missing("state")]);
    }

    #[test]
    fn test_misplaced_bound_rejected() {
        let shape = Shape::new(ShapeName::PersonId, vec![FieldDef::required_int("id").length(1, 2)]);
        assert!(shape.validate_structure().is_err());

        let shape = Shape::new(ShapeName::PersonId, vec![FieldDef::required_string("id").gt(0)]);
        assert!(shape.validate_structure().is_err());
    }

    #[test]
    fn test_bounds() {
        assert!(!Bound::Gt(0).admits_int(0));
        assert!(Bound::Gt(0).admits_int(1));
        assert!(Bound::Lt(130).admits_int(129));
        assert!(!Bound::Lt(130).admits_int(130));
        assert!(Bound::Le(130).admits_int(130));
        assert!(Bound::MinLength(8).admits_len(8));
        assert!(!Bound::MinLength(8).admits_len(7));
        assert_eq!(Bound::Lt(130).to_string(), "< 130");
    }

    #[test]
    fn test_hair_color_round_trip_names() {
        for color in HairColor::ALL {
            assert_eq!(color.as_str().parse::<HairColor>(), Ok(color));
        }
        assert!("green".parse::<HairColor>().is_err());
        assert_eq!(
            EnumKind::HairColor.allowed(),
            vec!["white", "brown", "black", "blonde", "red"]
        );
    }

    #[test]
    fn test_shape_name_lookup() {
        assert_eq!("user_info".parse::<ShapeName>().unwrap(), ShapeName::UserInfo);
        let err = "nope".parse::<ShapeName>().unwrap_err();
        assert!(matches!(err, ShapeError::UnknownShape(_)));
    }
}

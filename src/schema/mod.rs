//! Record validation and response shaping
//!
//! A shape is a named, ordered set of field definitions. Raw request data is
//! validated against a shape and yields either a normalized `Record` or the
//! full list of `FieldViolation`s.
//!
//! # Design Principles
//!
//! - Shapes are immutable constants, built by explicit composition
//! - Every field is checked; violations are never truncated
//! - Absence and explicit null are distinct
//! - Validation is pure and deterministic
//! - Shaping never mutates the source record

mod errors;
mod record;
mod shapes;
mod types;
mod validator;

pub use errors::{FieldViolation, ShapeError, ShapeResult, ViolationKind};
pub use record::{FieldPresence, Record};
pub use shapes::{all_shapes, shape};
pub use types::{Bound, EnumKind, FieldDef, FieldType, HairColor, Requirement, Shape, ShapeName};
pub use validator::{compose_records, validate, validate_document, ROOT_FIELD};

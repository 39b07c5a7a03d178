//! People HTTP Routes
//!
//! Person creation, lookup and update over an in-memory list of person ids.
//! Every handler hands raw request data to the record validator and shapes
//! the resulting record before it is returned.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use super::raw::{string_fields, validate_member};
use crate::schema::{self, FieldViolation, Record, ShapeName};

/// Fields never returned to callers.
pub const HIDDEN_FIELDS: &[&str] = &["password"];

/// Shared people state
pub struct PeopleState {
    people: Vec<i64>,
}

impl PeopleState {
    pub fn new(people: Vec<i64>) -> Self {
        Self { people }
    }

    pub fn contains(&self, person_id: i64) -> bool {
        self.people.contains(&person_id)
    }
}

impl Default for PeopleState {
    fn default() -> Self {
        Self::new(vec![1, 2, 3, 4, 5])
    }
}

/// People routes with shared state
pub fn people_routes(state: Arc<PeopleState>) -> Router {
    Router::new()
        .route("/new", post(create_person))
        .route("/details", get(show_person_by_query))
        .route("/details/:person_id", get(show_person_by_id))
        .route("/:person_id", put(update_person))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// Create a person; the password is never echoed back.
async fn create_person(Json(body): Json<Value>) -> ApiResult<(StatusCode, Json<Record>)> {
    let person = schema::validate_document(ShapeName::Person, &body)?;
    tracing::info!(shape = %person.shape(), "person created");
    Ok((StatusCode::CREATED, Json(person.exclude(HIDDEN_FIELDS))))
}

/// Person details from query parameters.
///
/// Returns `{"<name> <last_name>": age}`; age is null when not supplied.
async fn show_person_by_query(
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let query = schema::validate(ShapeName::PersonQuery, &string_fields(params))?;

    let full_name = format!(
        "{} {}",
        query.get_str("name").unwrap_or_default(),
        query.get_str("last_name").unwrap_or_default()
    );
    let age = query.get("age").cloned().unwrap_or(Value::Null);

    let mut body = Map::new();
    body.insert(full_name, age);
    Ok(Json(Value::Object(body)))
}

/// Whether a person id exists.
async fn show_person_by_id(
    State(state): State<Arc<PeopleState>>,
    Path(person_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let person_id = validate_person_id(person_id).map_err(ApiError::Validation)?;

    if !state.contains(person_id) {
        return Err(ApiError::PersonNotFound(person_id));
    }

    let mut body = Map::new();
    body.insert(person_id.to_string(), Value::from("It exists!"));
    Ok(Json(Value::Object(body)))
}

/// Update a person's data and location.
///
/// The body carries `person` and `location` objects, each validated
/// against its own shape; the response is the combined user info without
/// the password.
async fn update_person(
    Path(person_id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let mut violations = Vec::new();

    let person_id = match validate_person_id(person_id) {
        Ok(id) => Some(id),
        Err(v) => {
            violations.extend(v);
            None
        }
    };

    let person = validate_member(&body, "person", ShapeName::Person);
    let location = validate_member(&body, "location", ShapeName::Location);

    let user_info = match (person, location) {
        (Ok(person), Ok(location)) => {
            match schema::compose_records(ShapeName::UserInfo, &[&location, &person]) {
                Ok(record) => Some(record),
                Err(v) => {
                    violations.extend(v);
                    None
                }
            }
        }
        (person, location) => {
            violations.extend(person.err().unwrap_or_default());
            violations.extend(location.err().unwrap_or_default());
            None
        }
    };

    match (person_id, user_info) {
        (Some(person_id), Some(user_info)) => {
            tracing::info!(person_id, "person updated");
            Ok((
                StatusCode::ACCEPTED,
                Json(user_info.exclude(HIDDEN_FIELDS)),
            ))
        }
        _ => Err(ApiError::Validation(violations)),
    }
}

fn validate_person_id(raw: String) -> Result<i64, Vec<FieldViolation>> {
    let record = schema::validate(ShapeName::PersonId, &string_fields([("person_id", raw)]))?;
    record
        .get_i64("person_id")
        .ok_or_else(|| vec![FieldViolation::wrong_type("person_id", "int")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_people() {
        let state = PeopleState::default();
        assert!(state.contains(1));
        assert!(state.contains(5));
        assert!(!state.contains(6));
    }

    #[test]
    fn test_person_id_validation() {
        assert_eq!(validate_person_id("3".into()), Ok(3));

        let v = validate_person_id("0".into()).unwrap_err();
        assert_eq!(v[0].code(), "out_of_range");

        let v = validate_person_id("abc".into()).unwrap_err();
        assert_eq!(v[0].code(), "wrong_type");
    }
}

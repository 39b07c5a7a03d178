//! Form and upload HTTP Routes
//!
//! Login, contact and image upload endpoints. These echo validated input
//! back to the caller; nothing is stored.

use std::cmp::Ordering;
use std::collections::HashMap;

use axum::{
    extract::{Form, Json, Multipart},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::raw::{cookie_value, header_value, string_fields};
use crate::schema::{self, ShapeName};

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

/// Form routes (stateless)
pub fn form_routes() -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/contact", post(contact_handler))
        .route("/post-image", post(post_image_handler))
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ImageResponse {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Format")]
    pub format: String,
    #[serde(rename = "Size(kb)")]
    pub size_kb: f64,
}

impl ImageResponse {
    pub fn new(filename: impl Into<String>, format: impl Into<String>, len: usize) -> Self {
        Self {
            filename: filename.into(),
            format: format.into(),
            size_kb: size_in_kb(len),
        }
    }
}

/// Size in kilobytes, rounded to two decimals with ties to even.
pub fn size_in_kb(len: usize) -> f64 {
    // len / 1024 in hundredths is len * 25 / 256; round that ratio exactly.
    let scaled = len as u128 * 25;
    let (quotient, remainder) = (scaled / 256, scaled % 256);
    let hundredths = match remainder.cmp(&128) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + quotient % 2,
    };
    hundredths as f64 / 100.0
}

// ==================
// Handlers
// ==================

/// Login handler; only the username is echoed.
async fn login_handler(
    Form(fields): Form<HashMap<String, String>>,
) -> ApiResult<(StatusCode, Json<LoginResponse>)> {
    let login = schema::validate(ShapeName::LoginForm, &string_fields(fields))?;
    let username = login.get_str("username").unwrap_or_default().to_string();
    tracing::info!(%username, "login");
    Ok((StatusCode::CREATED, Json(LoginResponse { username })))
}

/// Contact form handler; returns the caller's user agent.
async fn contact_handler(
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut raw = string_fields(fields);
    // Header and cookie values always win over same-named form fields.
    raw.remove("user_agent");
    raw.remove("ads");
    if let Some(agent) = header_value(&headers, header::USER_AGENT) {
        raw.insert("user_agent".into(), Value::String(agent));
    }
    if let Some(ads) = cookie_value(&headers, "ads") {
        raw.insert("ads".into(), Value::String(ads));
    }

    let contact = schema::validate(ShapeName::ContactForm, &raw)?;
    tracing::info!(has_ads = contact.contains("ads"), "contact message received");

    let user_agent = contact.get("user_agent").cloned().unwrap_or(Value::Null);
    Ok((StatusCode::ACCEPTED, Json(user_agent)))
}

/// Image upload handler; reports name, content type and size.
async fn post_image_handler(
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ImageResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            break;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?;

        tracing::info!(file = %file_name, bytes = data.len(), "image received");
        return Ok((
            StatusCode::CREATED,
            Json(ImageResponse::new(file_name, content_type, data.len())),
        ));
    }

    Err(ApiError::MissingFile(IMAGE_FIELD.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_in_kb() {
        assert_eq!(size_in_kb(0), 0.0);
        assert_eq!(size_in_kb(1024), 1.0);
        assert_eq!(size_in_kb(1536), 1.5);
        assert_eq!(size_in_kb(1000), 0.98);
    }

    #[test]
    fn test_size_in_kb_ties_to_even() {
        // 128 bytes is exactly 0.125 kb
        assert_eq!(size_in_kb(128), 0.12);
        // 384 bytes is exactly 0.375 kb
        assert_eq!(size_in_kb(384), 0.38);
        assert_eq!(size_in_kb(129), 0.13);
    }

    #[test]
    fn test_image_response_serialization() {
        let response = ImageResponse::new("cat.png", "image/png", 2048);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Filename"], "cat.png");
        assert_eq!(json["Format"], "image/png");
        assert_eq!(json["Size(kb)"], 2.0);
    }
}

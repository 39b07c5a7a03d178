//! # People HTTP Server Module
//!
//! Thin HTTP collaborator around the record validator. Handlers extract raw
//! values from the body, query, path, form, headers, cookies or multipart
//! parts, validate them, and shape the resulting records.
//!
//! # Endpoints
//!
//! - `/` - Hello World
//! - `/health` - Health check
//! - `/person/*` - Person creation, lookup and update
//! - `/login`, `/contact`, `/post-image` - Form and upload echoes

pub mod config;
pub mod errors;
pub mod form_routes;
pub mod meta_routes;
pub mod people_routes;
pub mod raw;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;

//! people-api - a small people API with shape-driven request validation
//!
//! - `schema`: shapes, the record validator and response shaping
//! - `http_server`: axum routes that call into the validator
//! - `cli`: command-line entry points

pub mod cli;
pub mod http_server;
pub mod schema;

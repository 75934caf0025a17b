use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

pub mod admin;
pub mod chat;
pub mod feedback;

// Error bodies carry a `detail` field, the shape the frontend consumes.
pub(crate) fn error_response(status: StatusCode, detail: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": detail })))
}

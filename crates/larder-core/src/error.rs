use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error envelope shared by every service error type.
///
/// `field` is present only for a single field-level validation error, `errors` only when
/// several fields failed at once.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub kind: &'a str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<&'a str, String>>,
}

/// Render an error envelope with the given status.
///
/// Logging is left to the caller: tower-http TraceLayer already records
/// method/uri/status for every request.
pub fn error_response(status: StatusCode, body: ErrorBody<'_>) -> Response {
    (status, axum::Json(body)).into_response()
}

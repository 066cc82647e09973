//! Response helpers for API handlers.

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

/// JSON response body rendered with indentation.
///
/// Used where the output is meant to be read by a person as-is.
#[derive(Debug)]
pub struct PrettyJson<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => (
                [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            Err(e) => AppError::InternalError(e.to_string()).into_response(),
        }
    }
}

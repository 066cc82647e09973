//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor that reports malformed bodies as [`AppError::BadRequest`].
///
/// The body is parsed as JSON whatever its `Content-Type` says. The error
/// message is the parser's own description of what went wrong.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(AppJson)
            .map_err(|err| AppError::BadRequest(err.to_string()))
    }
}

//! Request extractors shared by module handlers.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

/// JSON request body that may be absent.
///
/// An empty body (or a literal `null`) yields `JsonBody(None)` so handlers can
/// order their own checks; malformed JSON or a shape mismatch is a 400
/// validation error.
#[derive(Debug)]
pub struct JsonBody<T>(pub Option<T>);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(None));
        }

        let Json(value) = Json::<Option<T>>::from_bytes(&bytes).map_err(|rejection| {
            AppError::validation(
                vec![json!({ "error": rejection.body_text() })],
                "Request body is not valid JSON for this resource",
            )
        })?;

        Ok(JsonBody(value))
    }
}

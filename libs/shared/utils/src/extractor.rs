use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use shared_models::error::AppError;

/// JSON request body that must be an object.
///
/// An empty body yields `T::default()`. Anything that is not valid JSON, or
/// valid JSON that is not an object, is rejected with a 400 carrying the
/// parser message. The `Content-Type` header is not inspected.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(body_read_error)?;

        parse_json_object(&bytes).map(JsonBody)
    }
}

fn body_read_error(rejection: BytesRejection) -> AppError {
    let message = format!("Failed to read request body: {}", rejection.body_text());
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(message),
        _ => AppError::BadRequest(message),
    }
}

pub fn parse_json_object<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        tracing::debug!("Empty request body, treating as no criteria");
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body format: {}", e)))?;

    if !value.is_object() {
        return Err(AppError::BadRequest(
            "Invalid request body format: expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body format: {}", e)))
}

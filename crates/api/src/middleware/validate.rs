//! Request body validation middleware.

use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Largest body the validator buffers.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Require a JSON body that deserializes into `T` and passes `T`'s
/// [`Validate`] rules. Rejects with 400 otherwise.
///
/// The body is buffered and forwarded unchanged, so the handler can still
/// extract it with `Json<T>`. Use with a turbofish:
///
/// ```ignore
/// post(handler).layer(axum::middleware::from_fn(validate_body::<SingleSearchRequest>))
/// ```
pub async fn validate_body<T>(req: Request, next: Next) -> AppResult<Response>
where
    T: DeserializeOwned + Validate,
{
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| AppError::BadRequest("Request body is unreadable or too large".into()))?;

    {
        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {e}")))?;
        value.validate()?;
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

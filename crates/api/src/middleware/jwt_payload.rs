//! Session payload extraction middleware and extractor.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use phonelive_core::error::CoreError;

use crate::auth::jwt::{decode_payload, extract_token, JwtConfig, JwtPayload};
use crate::error::{AppError, AppResult};

/// Decode the member session from the access token and insert it into the
/// request extensions as a [`JwtPayload`].
///
/// Rejects with 401 when the token is missing or its payload lacks the
/// session fields.
pub async fn extract_jwt_payload(
    State(jwt): State<Arc<JwtConfig>>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let payload = {
        let token = extract_token(req.headers(), &jwt.cookie_name).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing session token".into()))
        })?;
        decode_payload(token, &jwt).map_err(|e| {
            tracing::debug!(error = %e, "Token carries no usable session payload");
            AppError::Core(CoreError::Unauthorized(
                "Session payload is missing or malformed".into(),
            ))
        })?
    };

    tracing::debug!(
        member_id = payload.member_id,
        company_id = payload.company_id,
        "Session payload attached",
    );
    req.extensions_mut().insert(payload);
    Ok(next.run(req).await)
}

/// Handlers take the session as an extractor:
///
/// ```ignore
/// async fn my_handler(session: JwtPayload) -> AppResult<Json<()>> {
///     tracing::info!(member_id = session.member_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Only valid on routes guarded by [`extract_jwt_payload`].
impl<S> FromRequestParts<S> for JwtPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<JwtPayload>().cloned().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Session payload missing".into()))
        })
    }
}

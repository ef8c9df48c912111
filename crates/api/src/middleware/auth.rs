//! Session token verification middleware.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use phonelive_core::error::CoreError;

use crate::auth::jwt::{extract_token, validate_access_token, JwtConfig};
use crate::error::{AppError, AppResult};

/// Require a valid, unexpired access token in the session cookie or the
/// `Authorization: Bearer` header. Rejects with 401 otherwise.
///
/// Only the registered claims are checked here; the member session is read
/// later by [`extract_jwt_payload`](super::jwt_payload::extract_jwt_payload).
pub async fn require_auth(
    State(jwt): State<Arc<JwtConfig>>,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    let token = extract_token(req.headers(), &jwt.cookie_name).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing session token".into()))
    })?;

    let claims = validate_access_token(token, &jwt).map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    tracing::debug!(sub = %claims.sub, "Authenticated request");
    Ok(next.run(req).await)
}

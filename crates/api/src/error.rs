use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use phonelive_core::error::CoreError;
use phonelive_data::UpstreamError;
use serde_json::json;

/// Application-level error type for HTTP handlers and middleware.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `phonelive_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed call to the upstream data service.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Field-level validation failures on a request body.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] validator::ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Upstream errors ---
            AppError::Upstream(err) => classify_upstream_error(err),

            // --- Body validation: include per-field messages ---
            AppError::InvalidBody(errors) => {
                let body = json!({
                    "error": "Request body failed validation",
                    "code": "VALIDATION_ERROR",
                    "details": field_messages(errors),
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an upstream failure into an HTTP status, error code, and message.
///
/// - 404 from upstream maps to 404.
/// - A timed-out request maps to 504.
/// - Everything else maps to 502 with a sanitized message.
fn classify_upstream_error(err: &UpstreamError) -> (StatusCode, &'static str, String) {
    if err.is_not_found() {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }
    match err {
        UpstreamError::Request(e) if e.is_timeout() => {
            tracing::error!(error = %e, "Upstream request timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "The data service did not respond in time".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Upstream error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The data service returned an error".to_string(),
            )
        }
    }
}

/// Flatten validator errors into `{ field: [message, ...] }`.
fn field_messages(errors: &validator::ValidationErrors) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed `{}` check", e.code))
                })
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect();
    serde_json::Value::Object(map)
}

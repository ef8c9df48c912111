//! Request interceptors used in route middleware chains.
//!
//! - [`auth::require_auth`] -- Rejects requests without a valid session token.
//! - [`validate::validate_body`] -- Rejects JSON bodies failing `validator` rules.
//! - [`jwt_payload::extract_jwt_payload`] -- Attaches the member session to the request.
//!
//! Each is an `axum::middleware::from_fn` function, so the chain order is
//! decided where the routes are registered.

pub mod auth;
pub mod jwt_payload;
pub mod validate;

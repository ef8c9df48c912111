//! JWT verification and session payload decoding.
//!
//! Access tokens are HS256-signed JWTs. They travel in the session cookie
//! set by the web app, or in an `Authorization: Bearer` header for API
//! clients. Verification ([`validate_access_token`]) only checks signature,
//! expiry and subject; reading the member session ([`decode_payload`]) is a
//! separate step run later in the middleware chain.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use jsonwebtoken::{decode, DecodingKey, Validation};
use phonelive_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Default name of the cookie holding the access token.
const DEFAULT_COOKIE_NAME: &str = "access_token";

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the issuing auth service.
    pub secret: String,
    /// Cookie carrying the access token.
    pub cookie_name: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default        |
    /// |-------------------|----------|----------------|
    /// | `JWT_SECRET`      | **yes**  | --             |
    /// | `JWT_COOKIE_NAME` | no       | `access_token` |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let cookie_name =
            std::env::var("JWT_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string());

        Self {
            secret,
            cookie_name,
        }
    }
}

/// Registered claims every access token must carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject -- the authenticated account.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
}

/// Member session carried in the token payload.
///
/// Inserted into request extensions by
/// [`extract_jwt_payload`](crate::middleware::jwt_payload::extract_jwt_payload)
/// and read by handlers as an extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtPayload {
    pub member_id: DbId,
    pub company_id: DbId,
    /// Role name at issue time. Authorization re-reads the stored role.
    pub role: String,
}

/// Locate the raw access token: session cookie first, then Bearer header.
pub fn extract_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    cookie_value(headers, cookie_name).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// Verify signature and expiry, returning the registered claims.
pub fn validate_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(data.claims)
}

/// Decode the member session from a token.
///
/// Fails when the signature is bad, the token expired, or the payload does
/// not carry the session fields.
pub fn decode_payload(
    token: &str,
    config: &JwtConfig,
) -> Result<JwtPayload, jsonwebtoken::errors::Error> {
    let data = decode::<JwtPayload>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

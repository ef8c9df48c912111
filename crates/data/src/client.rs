//! HTTP client for the upstream data service.
//!
//! Every upstream endpoint answers with a `{ "data": ... }` envelope. This
//! module unwraps it, attaches the API key header and turns non-2xx
//! statuses into [`UpstreamError::Api`].

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::UpstreamConfig;

/// Header carrying the upstream API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Empty query string for endpoints that take no parameters.
pub const NO_QUERY: &[(&str, &str)] = &[];

/// Errors from the upstream REST layer.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream service returned a non-2xx status code.
    #[error("Upstream API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl UpstreamError {
    /// Whether the upstream answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::Api { status, .. } if *status == StatusCode::NOT_FOUND.as_u16())
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Client bound to one upstream base URL.
///
/// Cloning is cheap: the inner [`reqwest::Client`] is a pooled handle.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Build a client reusing the shared [`reqwest::Client`] so every
    /// repository draws from one connection pool.
    pub fn new(config: &UpstreamConfig, http: &reqwest::Client) -> Self {
        Self {
            http: http.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// `GET {base}{path}?{query}` and unwrap the `data` field.
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::parse_response(response).await
    }

    /// Like [`get`](Self::get) but maps a 404 to `Ok(None)`.
    pub async fn get_optional<T, Q>(&self, path: &str, query: &Q) -> Result<Option<T>, UpstreamError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        match self.get(path, query).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `POST {base}{path}` with a JSON body and unwrap the `data` field.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// `POST {base}{path}` with a JSON body, discarding the response body.
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), UpstreamError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(self.timeout)
    }

    /// Return the response unchanged on success, or an
    /// [`UpstreamError::Api`] with the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), %body, "Upstream returned an error status");
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, UpstreamError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Envelope<T>>().await?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Spawn a throwaway upstream on an ephemeral port and return its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: String) -> UpstreamClient {
        let config = UpstreamConfig {
            base_url,
            api_key: "secret-key".to_string(),
            timeout_secs: 5,
        };
        UpstreamClient::new(&config, &reqwest::Client::new())
    }

    #[tokio::test]
    async fn get_unwraps_envelope_and_sends_api_key() {
        let app = Router::new().route(
            "/echo",
            get(|headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                let key = headers
                    .get(API_KEY_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "data": { "key": key, "q": q.get("q") } }))
            }),
        );
        let client = client_for(spawn_upstream(app).await);

        let value: Value = client
            .get("/echo", &[("q", "hello")])
            .await
            .expect("request should succeed");
        assert_eq!(value["key"], "secret-key");
        assert_eq!(value["q"], "hello");
    }

    #[tokio::test]
    async fn get_optional_maps_404_to_none() {
        let app = Router::new().route("/missing", get(|| async { StatusCode::NOT_FOUND }));
        let client = client_for(spawn_upstream(app).await);

        let value: Option<Value> = client
            .get_optional("/missing", NO_QUERY)
            .await
            .expect("404 is not an error");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn server_errors_carry_status_and_body() {
        let app = Router::new().route(
            "/boom",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let client = client_for(spawn_upstream(app).await);

        let err = client
            .get::<Value, _>("/boom", NO_QUERY)
            .await
            .expect_err("502 must fail");
        assert_matches!(&err, UpstreamError::Api { status: 502, body } if body == "upstream down");
        assert!(!err.is_not_found());
    }
}

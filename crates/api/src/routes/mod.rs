pub mod health;
pub mod phone_live_status;

use axum::Router;

use crate::config::ServerConfig;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /phone-live-status/jobs                         list jobs
/// /phone-live-status/jobs-summary                 summary counters
/// /phone-live-status/jobs-summary/export          summary CSV
/// /phone-live-status/jobs/{id}/details            job + detail page
/// /phone-live-status/jobs/{id}/details/export     detail CSV
/// /phone-live-status/single-request               single search (POST)
/// /phone-live-status/bulk-request                 bulk search (POST)
/// ```
pub fn api_routes(config: &ServerConfig, http: &reqwest::Client) -> Router {
    phone_live_status::setup_init(Router::new(), config, http)
}

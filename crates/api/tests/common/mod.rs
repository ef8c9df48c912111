#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{self, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use phonelive_api::auth::jwt::JwtConfig;
use phonelive_api::config::ServerConfig;
use phonelive_api::router::build_app_router;
use phonelive_data::UpstreamConfig;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const COOKIE_NAME: &str = "access_token";

/// Company every seeded member belongs to.
pub const COMPANY_ID: i64 = 10;
/// Admin role: every permission.
pub const ADMIN_MEMBER: i64 = 1;
/// Viewer role: read only.
pub const VIEWER_MEMBER: i64 = 2;
pub const INACTIVE_MEMBER: i64 = 3;

/// Job owned by `COMPANY_ID`.
pub const OWN_JOB: i64 = 100;
/// Job whose detail endpoints fail upstream with a 500.
pub const BROKEN_JOB: i64 = 500;

// ---------------------------------------------------------------------------
// Fake upstream
// ---------------------------------------------------------------------------

/// In-process stand-in for the upstream data service.
#[derive(Clone, Default)]
pub struct FakeUpstream {
    pub log_entries: Arc<Mutex<Vec<Value>>>,
    pub member_lookups: Arc<AtomicUsize>,
}

impl FakeUpstream {
    pub fn member_lookup_count(&self) -> usize {
        self.member_lookups.load(Ordering::SeqCst)
    }

    pub fn logged_actions(&self) -> Vec<String> {
        self.log_entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e["action"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

fn job_json(id: i64, total: i64) -> Value {
    json!({
        "id": id,
        "company_id": COMPANY_ID,
        "member_id": ADMIN_MEMBER,
        "name": format!("batch {id}"),
        "total_numbers": total,
        "success_count": total,
        "fail_count": 0,
        "status": "done",
        "created_at": "2026-03-01T08:00:00Z",
        "updated_at": "2026-03-01T08:05:00Z"
    })
}

fn detail_json(id: i64, job_id: i64, phone: &str) -> Value {
    json!({
        "id": id,
        "job_id": job_id,
        "phone_number": phone,
        "subscriber_status": "active",
        "operator": "Telkomsel",
        "device_status": "reachable",
        "status": "success",
        "message": null,
        "created_at": "2026-03-01T08:01:00Z"
    })
}

fn data(value: Value) -> Response {
    Json(json!({ "data": value })).into_response()
}

fn company_matches(q: &HashMap<String, String>) -> bool {
    q.get("company_id").map(String::as_str) == Some("10")
}

async fn member(State(fake): State<FakeUpstream>, Path(id): Path<i64>) -> Response {
    fake.member_lookups.fetch_add(1, Ordering::SeqCst);
    let (role_id, is_active) = match id {
        ADMIN_MEMBER => (1, true),
        VIEWER_MEMBER => (2, true),
        INACTIVE_MEMBER => (1, false),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    data(json!({
        "id": id,
        "company_id": COMPANY_ID,
        "role_id": role_id,
        "name": format!("member {id}"),
        "email": format!("member{id}@example.test"),
        "is_active": is_active
    }))
}

async fn role(Path(id): Path<i64>) -> Response {
    match id {
        1 => data(json!({ "id": 1, "name": "admin", "permissions": [] })),
        2 => data(json!({
            "id": 2,
            "name": "viewer",
            "permissions": ["phone_live_status:read"]
        })),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn log_operation(State(fake): State<FakeUpstream>, Json(entry): Json<Value>) -> Response {
    fake.log_entries.lock().unwrap().push(entry);
    (StatusCode::CREATED, Json(json!({ "data": null }))).into_response()
}

async fn list_jobs(Query(q): Query<HashMap<String, String>>) -> Response {
    if !company_matches(&q) {
        return data(json!({ "items": [], "total": 0, "page": 1, "limit": 10 }));
    }
    let page: i64 = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let limit: i64 = q.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
    data(json!({ "items": [job_json(OWN_JOB, 3)], "total": 1, "page": page, "limit": limit }))
}

async fn export_jobs(Query(q): Query<HashMap<String, String>>) -> Response {
    if q.get("start_date").is_none() || q.get("end_date").is_none() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    data(json!([job_json(OWN_JOB, 3), job_json(101, 2)]))
}

async fn jobs_summary(Query(q): Query<HashMap<String, String>>) -> Response {
    data(json!({
        "start_date": q.get("start_date"),
        "end_date": q.get("end_date"),
        "total_jobs": 2,
        "total_numbers": 5,
        "total_active": 4,
        "total_inactive": 1,
        "total_unreachable": 0,
        "total_failed": 0
    }))
}

async fn get_job(Path(id): Path<i64>, Query(q): Query<HashMap<String, String>>) -> Response {
    if company_matches(&q) && (id == OWN_JOB || id == BROKEN_JOB) {
        data(job_json(id, 2))
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn job_details(Path(id): Path<i64>, Query(q): Query<HashMap<String, String>>) -> Response {
    if id == BROKEN_JOB {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    let page: i64 = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    data(json!({
        "items": [detail_json(1, id, "081234567890")],
        "total": 2,
        "page": page,
        "limit": 1
    }))
}

async fn export_job_details(Path(id): Path<i64>) -> Response {
    if id == BROKEN_JOB {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    data(json!([
        detail_json(1, id, "081234567890"),
        detail_json(2, id, "081298765432")
    ]))
}

async fn single_request(Json(body): Json<Value>) -> Response {
    data(json!({
        "phone_number": body["phone_number"],
        "subscriber_status": "active",
        "operator": "Telkomsel",
        "device_status": "reachable",
        "checked_at": "2026-03-01T08:00:00Z"
    }))
}

async fn bulk_request(Json(body): Json<Value>) -> Response {
    let total = body["phone_numbers"].as_array().map_or(0, Vec::len) as i64;
    let mut job = job_json(777, total);
    job["name"] = body["name"].clone();
    job["status"] = json!("pending");
    data(job)
}

impl FakeUpstream {
    fn router(&self) -> Router {
        Router::new()
            .route("/members/{id}", routing::get(member))
            .route("/roles/{id}", routing::get(role))
            .route("/log-operations", post(log_operation))
            .route("/phone-live-status/jobs", routing::get(list_jobs))
            .route("/phone-live-status/jobs/export", routing::get(export_jobs))
            .route("/phone-live-status/jobs-summary", routing::get(jobs_summary))
            .route("/phone-live-status/jobs/{id}", routing::get(get_job))
            .route("/phone-live-status/jobs/{id}/details", routing::get(job_details))
            .route(
                "/phone-live-status/jobs/{id}/details/export",
                routing::get(export_job_details),
            )
            .route("/phone-live-status/single-request", post(single_request))
            .route("/phone-live-status/bulk-request", post(bulk_request))
            .with_state(self.clone())
    }

    /// Serve the fake on an ephemeral port and return its base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let addr = listener.local_addr().expect("local addr");
        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake upstream should run");
        });
        format!("http://{addr}")
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` pointing at `upstream_base_url`.
pub fn test_config(upstream_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            cookie_name: COOKIE_NAME.to_string(),
        },
        upstream: UpstreamConfig {
            base_url: upstream_base_url.to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
        },
    }
}

/// Start a fake upstream and build the full application router against it.
pub async fn build_test_app() -> (Router, FakeUpstream) {
    let fake = FakeUpstream::default();
    let base_url = fake.spawn().await;
    let config = test_config(&base_url);
    let app = build_app_router(&config, &reqwest::Client::new());
    (app, fake)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

fn sign(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("encoding should succeed")
}

/// A valid token carrying a full member session.
pub fn session_token(member_id: i64) -> String {
    session_token_for_company(member_id, COMPANY_ID)
}

/// A valid session token claiming `company_id` for the member.
pub fn session_token_for_company(member_id: i64, company_id: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    sign(json!({
        "sub": format!("member-{member_id}"),
        "exp": now + 900,
        "iat": now,
        "jti": uuid::Uuid::new_v4().to_string(),
        "member_id": member_id,
        "company_id": company_id,
        "role": "admin",
    }))
}

/// A correctly signed token without the session fields.
pub fn token_without_session() -> String {
    let now = chrono::Utc::now().timestamp();
    sign(json!({ "sub": "service-account", "exp": now + 900, "iat": now }))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(t) => builder.header("cookie", format!("{COOKIE_NAME}={t}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, builder("GET", uri, token).body(Body::empty()).unwrap()).await
}

pub async fn get_bearer(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response {
    let request = builder("POST", uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body should be JSON")
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("body should be UTF-8")
}

//! Handlers for the phone live status feature.
//!
//! Every handler runs behind [`require_auth`](crate::middleware::auth::require_auth)
//! and [`extract_jwt_payload`](crate::middleware::jwt_payload::extract_jwt_payload),
//! so the session is always available as a [`JwtPayload`] extractor.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use phonelive_core::permissions::{PERM_EXPORT, PERM_READ, PERM_SEARCH};
use phonelive_core::types::DbId;
use phonelive_data::models::job::{Job, JobDetail, JobDetailQuery, JobListQuery, SummaryQuery};
use phonelive_data::models::log_operation::{
    ACTION_BULK_SEARCH, ACTION_EXPORT_DETAILS, ACTION_EXPORT_SUMMARY, ACTION_SINGLE_SEARCH,
};
use phonelive_data::models::search::{BulkSearchRequest, SingleSearchRequest};
use serde::Serialize;

use crate::auth::jwt::JwtPayload;
use crate::error::AppResult;
use crate::response::{DataResponse, PageMeta, PageResponse};
use crate::services::{MemberService, PhoneLiveStatusService};

/// Composes the feature service and the member service.
#[derive(Debug, Clone)]
pub struct PhoneLiveStatusController {
    feature: PhoneLiveStatusService,
    members: MemberService,
}

impl PhoneLiveStatusController {
    pub fn new(feature: PhoneLiveStatusService, members: MemberService) -> Self {
        Self { feature, members }
    }
}

/// Router state shared by the handlers below.
pub type ControllerState = State<Arc<PhoneLiveStatusController>>;

/// A job together with one page of its checked numbers.
#[derive(Debug, Serialize)]
pub struct JobDetailsView {
    pub job: Job,
    pub details: Vec<JobDetail>,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// GET /jobs
///
/// List the company's bulk jobs. Supports `page`, `limit`, `status`,
/// `start_date`, `end_date` and `keyword`.
pub async fn list_jobs(
    State(ctrl): ControllerState,
    session: JwtPayload,
    Query(query): Query<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    let member = ctrl.members.authorize(&session, PERM_READ).await?;
    let page = ctrl.feature.list_jobs(&member, &query).await?;
    Ok(Json(PageResponse::from(page)))
}

/// GET /jobs/{id}/details
///
/// One job plus a page of its per-number results.
pub async fn get_job_details(
    State(ctrl): ControllerState,
    session: JwtPayload,
    Path(job_id): Path<DbId>,
    Query(query): Query<JobDetailQuery>,
) -> AppResult<impl IntoResponse> {
    let member = ctrl.members.authorize(&session, PERM_READ).await?;
    let (job, details) = ctrl.feature.job_details(&member, job_id, &query).await?;

    Ok(Json(PageResponse {
        meta: PageMeta {
            page: details.page,
            limit: details.limit,
            total: details.total,
        },
        data: JobDetailsView {
            job,
            details: details.items,
        },
    }))
}

/// GET /jobs/{id}/details/export
///
/// Every result of one job as a CSV attachment.
pub async fn export_job_details(
    State(ctrl): ControllerState,
    session: JwtPayload,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let member = ctrl.members.authorize(&session, PERM_EXPORT).await?;
    let export = ctrl.feature.export_job_details(&member, job_id).await?;

    ctrl.members
        .record(&session, ACTION_EXPORT_DETAILS, format!("Exported details of job {job_id}"))
        .await;

    Ok(export)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// GET /jobs-summary
///
/// Aggregated counters over `start_date..=end_date` (default: last 30 days).
pub async fn get_jobs_summary(
    State(ctrl): ControllerState,
    session: JwtPayload,
    Query(query): Query<SummaryQuery>,
) -> AppResult<impl IntoResponse> {
    let member = ctrl.members.authorize(&session, PERM_READ).await?;
    let summary = ctrl.feature.jobs_summary(&member, &query).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /jobs-summary/export
pub async fn export_jobs_summary(
    State(ctrl): ControllerState,
    session: JwtPayload,
    Query(query): Query<SummaryQuery>,
) -> AppResult<impl IntoResponse> {
    let member = ctrl.members.authorize(&session, PERM_EXPORT).await?;
    let export = ctrl.feature.export_jobs_summary(&member, &query).await?;

    ctrl.members
        .record(
            &session,
            ACTION_EXPORT_SUMMARY,
            format!("Exported {}", export.file_name),
        )
        .await;

    Ok(export)
}

// ---------------------------------------------------------------------------
// Searches
// ---------------------------------------------------------------------------

/// POST /single-request
///
/// Check one number synchronously. The body was already validated by the
/// route's middleware chain.
pub async fn single_search(
    State(ctrl): ControllerState,
    session: JwtPayload,
    Json(input): Json<SingleSearchRequest>,
) -> AppResult<impl IntoResponse> {
    let member = ctrl.members.authorize(&session, PERM_SEARCH).await?;
    let result = ctrl.feature.single_search(&member, input).await?;

    ctrl.members
        .record(
            &session,
            ACTION_SINGLE_SEARCH,
            format!("Checked {}", result.phone_number),
        )
        .await;

    Ok(Json(DataResponse { data: result }))
}

/// POST /bulk-request
///
/// Queue a bulk job. Returns 201 with the created job.
pub async fn bulk_search(
    State(ctrl): ControllerState,
    session: JwtPayload,
    Json(input): Json<BulkSearchRequest>,
) -> AppResult<impl IntoResponse> {
    let member = ctrl.members.authorize(&session, PERM_SEARCH).await?;
    let job = ctrl.feature.bulk_search(&member, input).await?;

    ctrl.members
        .record(
            &session,
            ACTION_BULK_SEARCH,
            format!("Queued job {} with {} numbers", job.id, job.total_numbers),
        )
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

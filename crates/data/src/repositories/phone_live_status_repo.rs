//! Repository for phone live status jobs, job details and searches.

use chrono::NaiveDate;
use phonelive_core::pagination::{clamp_limit, clamp_page};
use phonelive_core::types::DbId;
use serde::Serialize;

use crate::client::{UpstreamClient, UpstreamError};
use crate::config::UpstreamConfig;
use crate::models::job::{
    DetailStatus, Job, JobDetail, JobDetailQuery, JobListQuery, JobStatus, JobSummary,
};
use crate::models::pagination::Paginated;
use crate::models::search::{NewBulkJob, PhoneLiveStatusResult, SingleSearchCommand};

/// Upstream path prefix for this feature.
const BASE: &str = "/phone-live-status";

#[derive(Serialize)]
struct CompanyScope {
    company_id: DbId,
}

#[derive(Serialize)]
struct JobListParams<'a> {
    company_id: DbId,
    page: i64,
    limit: i64,
    status: Option<JobStatus>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    keyword: Option<&'a str>,
}

#[derive(Serialize)]
struct RangeParams {
    company_id: DbId,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Serialize)]
struct DetailListParams<'a> {
    company_id: DbId,
    page: i64,
    limit: i64,
    status: Option<DetailStatus>,
    keyword: Option<&'a str>,
}

/// Data access for the phone live status feature.
#[derive(Debug, Clone)]
pub struct PhoneLiveStatusRepo {
    client: UpstreamClient,
}

impl PhoneLiveStatusRepo {
    pub fn new(config: &UpstreamConfig, http: &reqwest::Client) -> Self {
        Self {
            client: UpstreamClient::new(config, http),
        }
    }

    /// List a company's jobs, newest first. Page and limit are clamped here.
    pub async fn list_jobs(
        &self,
        company_id: DbId,
        query: &JobListQuery,
    ) -> Result<Paginated<Job>, UpstreamError> {
        let params = JobListParams {
            company_id,
            page: clamp_page(query.page),
            limit: clamp_limit(query.limit),
            status: query.status,
            start_date: query.start_date,
            end_date: query.end_date,
            keyword: query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()),
        };
        self.client.get(&format!("{BASE}/jobs"), &params).await
    }

    /// Every job of a company created within `[start, end]`, unpaginated.
    pub async fn list_jobs_in_range(
        &self,
        company_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Job>, UpstreamError> {
        let params = RangeParams {
            company_id,
            start_date: start,
            end_date: end,
        };
        self.client.get(&format!("{BASE}/jobs/export"), &params).await
    }

    /// Find a job by id within a company. Jobs of other companies are `None`.
    pub async fn get_job(&self, company_id: DbId, job_id: DbId) -> Result<Option<Job>, UpstreamError> {
        self.client
            .get_optional(&format!("{BASE}/jobs/{job_id}"), &CompanyScope { company_id })
            .await
    }

    pub async fn get_jobs_summary(
        &self,
        company_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<JobSummary, UpstreamError> {
        let params = RangeParams {
            company_id,
            start_date: start,
            end_date: end,
        };
        self.client.get(&format!("{BASE}/jobs-summary"), &params).await
    }

    pub async fn list_job_details(
        &self,
        company_id: DbId,
        job_id: DbId,
        query: &JobDetailQuery,
    ) -> Result<Paginated<JobDetail>, UpstreamError> {
        let params = DetailListParams {
            company_id,
            page: clamp_page(query.page),
            limit: clamp_limit(query.limit),
            status: query.status,
            keyword: query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()),
        };
        self.client
            .get(&format!("{BASE}/jobs/{job_id}/details"), &params)
            .await
    }

    /// Every detail row of a job, unpaginated, for exports.
    pub async fn list_all_job_details(
        &self,
        company_id: DbId,
        job_id: DbId,
    ) -> Result<Vec<JobDetail>, UpstreamError> {
        self.client
            .get(
                &format!("{BASE}/jobs/{job_id}/details/export"),
                &CompanyScope { company_id },
            )
            .await
    }

    /// Check one number synchronously.
    pub async fn single_search(
        &self,
        command: &SingleSearchCommand,
    ) -> Result<PhoneLiveStatusResult, UpstreamError> {
        self.client
            .post(&format!("{BASE}/single-request"), command)
            .await
    }

    /// Queue a bulk job; the upstream processes it asynchronously.
    pub async fn create_bulk_job(&self, job: &NewBulkJob) -> Result<Job, UpstreamError> {
        self.client.post(&format!("{BASE}/bulk-request"), job).await
    }
}

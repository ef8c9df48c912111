//! Job models and query DTOs for phone live status checks.
//!
//! A job is one bulk request: a batch of phone numbers checked
//! asynchronously by the upstream service. Each number produces one
//! [`JobDetail`] row.

use chrono::NaiveDate;
use phonelive_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle of a bulk job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Done,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        }
    }
}

/// A bulk job as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: DbId,
    pub company_id: DbId,
    pub member_id: DbId,
    pub name: String,
    pub total_numbers: i64,
    pub success_count: i64,
    pub fail_count: i64,
    pub status: JobStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query parameters for `GET /jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListQuery {
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 10, capped at 100.
    pub limit: Option<i64>,
    pub status: Option<JobStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive match against the job name.
    pub keyword: Option<String>,
}

/// Query parameters for `GET /jobs-summary` and its export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Aggregated counters over all jobs of a company in a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_jobs: i64,
    pub total_numbers: i64,
    pub total_active: i64,
    pub total_inactive: i64,
    pub total_unreachable: i64,
    pub total_failed: i64,
}

/// Outcome of checking one number inside a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailStatus {
    Success,
    Fail,
}

impl DetailStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailStatus::Success => "success",
            DetailStatus::Fail => "fail",
        }
    }
}

/// One checked phone number within a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetail {
    pub id: DbId,
    pub job_id: DbId,
    pub phone_number: String,
    /// `active`, `inactive` or `unreachable` as reported by the operator.
    pub subscriber_status: Option<String>,
    pub operator: Option<String>,
    pub device_status: Option<String>,
    pub status: DetailStatus,
    pub message: Option<String>,
    pub created_at: Timestamp,
}

/// Query parameters for `GET /jobs/{id}/details`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDetailQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<DetailStatus>,
    /// Substring match against the phone number.
    pub keyword: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_status_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&JobStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        assert_eq!(JobStatus::Processing.as_str(), "processing");
    }

    #[test]
    fn job_deserializes_from_upstream_shape() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": 7,
            "company_id": 3,
            "member_id": 11,
            "name": "March batch",
            "total_numbers": 120,
            "success_count": 118,
            "fail_count": 2,
            "status": "done",
            "created_at": "2026-03-01T08:00:00Z",
            "updated_at": "2026-03-01T08:05:00Z"
        }))
        .unwrap();
        assert_eq!(job.status, JobStatus::Done);
        assert_eq!(job.total_numbers, 120);
    }
}

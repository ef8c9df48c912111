//! Phone live status jobs, summaries, exports and searches.
//!
//! Every operation takes the [`Member`] already authorized by
//! [`MemberService::authorize`](super::MemberService::authorize) and is
//! scoped to that member's company.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, Utc};
use phonelive_core::csv::CsvWriter;
use phonelive_core::error::CoreError;
use phonelive_core::types::DbId;
use phonelive_data::models::job::{
    Job, JobDetail, JobDetailQuery, JobListQuery, JobSummary, SummaryQuery,
};
use phonelive_data::models::member::Member;
use phonelive_data::models::pagination::Paginated;
use phonelive_data::models::search::{
    BulkSearchRequest, NewBulkJob, PhoneLiveStatusResult, SingleSearchCommand,
    SingleSearchRequest, MAX_BULK_NUMBERS, PHONE_NUMBER_RE,
};
use phonelive_data::repositories::PhoneLiveStatusRepo;

use crate::error::{AppError, AppResult};
use crate::response::CsvExport;

/// Summary range used when the caller omits `start_date`.
pub const DEFAULT_RANGE_DAYS: i64 = 30;
/// Longest summary range accepted, inclusive of both ends.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Feature service over the phone live status repository.
#[derive(Debug, Clone)]
pub struct PhoneLiveStatusService {
    repo: PhoneLiveStatusRepo,
}

impl PhoneLiveStatusService {
    pub fn new(repo: PhoneLiveStatusRepo) -> Self {
        Self { repo }
    }

    pub async fn list_jobs(&self, member: &Member, query: &JobListQuery) -> AppResult<Paginated<Job>> {
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(validation("start_date must not be after end_date"));
            }
        }
        Ok(self.repo.list_jobs(member.company_id, query).await?)
    }

    pub async fn jobs_summary(&self, member: &Member, query: &SummaryQuery) -> AppResult<JobSummary> {
        let (start, end) = resolve_range(query, Utc::now().date_naive())?;
        Ok(self.repo.get_jobs_summary(member.company_id, start, end).await?)
    }

    /// One CSV row per job in the range, followed by a totals row.
    pub async fn export_jobs_summary(
        &self,
        member: &Member,
        query: &SummaryQuery,
    ) -> AppResult<CsvExport> {
        let (start, end) = resolve_range(query, Utc::now().date_naive())?;
        let company_id = member.company_id;
        let jobs = self.repo.list_jobs_in_range(company_id, start, end).await?;

        tracing::info!(company_id, jobs = jobs.len(), %start, %end, "Exporting jobs summary");

        Ok(CsvExport {
            file_name: format!("jobs-summary-{start}-{end}.csv"),
            content: render_jobs_csv(&jobs),
        })
    }

    /// The job itself plus one page of its details.
    pub async fn job_details(
        &self,
        member: &Member,
        job_id: DbId,
        query: &JobDetailQuery,
    ) -> AppResult<(Job, Paginated<JobDetail>)> {
        let job = self.find_job(member.company_id, job_id).await?;
        let details = self
            .repo
            .list_job_details(member.company_id, job.id, query)
            .await?;
        Ok((job, details))
    }

    pub async fn export_job_details(&self, member: &Member, job_id: DbId) -> AppResult<CsvExport> {
        let company_id = member.company_id;
        let job = self.find_job(company_id, job_id).await?;
        let details = self.repo.list_all_job_details(company_id, job.id).await?;

        tracing::info!(company_id, job_id, rows = details.len(), "Exporting job details");

        Ok(CsvExport {
            file_name: format!("job-{job_id}-details.csv"),
            content: render_details_csv(&details),
        })
    }

    /// The request body has already passed [`SingleSearchRequest`]'s rules.
    pub async fn single_search(
        &self,
        member: &Member,
        request: SingleSearchRequest,
    ) -> AppResult<PhoneLiveStatusResult> {
        let command = SingleSearchCommand {
            company_id: member.company_id,
            member_id: member.id,
            phone_number: request.phone_number,
            loan_no: request.loan_no,
        };
        Ok(self.repo.single_search(&command).await?)
    }

    /// Queue a bulk job after normalizing and checking the number list.
    pub async fn bulk_search(&self, member: &Member, request: BulkSearchRequest) -> AppResult<Job> {
        let phone_numbers = normalize_bulk_numbers(&request.phone_numbers)?;

        let name = request
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("bulk-{}", Utc::now().format("%Y%m%d%H%M%S")));

        let job = self
            .repo
            .create_bulk_job(&NewBulkJob {
                company_id: member.company_id,
                member_id: member.id,
                name,
                phone_numbers,
            })
            .await?;

        tracing::info!(
            job_id = job.id,
            company_id = member.company_id,
            total_numbers = job.total_numbers,
            "Bulk job queued",
        );
        Ok(job)
    }

    async fn find_job(&self, company_id: DbId, job_id: DbId) -> AppResult<Job> {
        self.repo
            .get_job(company_id, job_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Job",
                id: job_id,
            }))
    }
}

/// Fill in defaults and check a summary range.
///
/// `end` defaults to `today`, `start` to `DEFAULT_RANGE_DAYS` before `end`.
pub fn resolve_range(
    query: &SummaryQuery,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), CoreError> {
    let end = query.end_date.unwrap_or(today);
    let start = match query.start_date {
        Some(start) => start,
        None => end
            .checked_sub_signed(Duration::days(DEFAULT_RANGE_DAYS))
            .ok_or_else(|| CoreError::Validation("end_date is out of range".into()))?,
    };

    if start > end {
        return Err(CoreError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }
    if (end - start).num_days() + 1 > MAX_RANGE_DAYS {
        return Err(CoreError::Validation(format!(
            "Date range must not exceed {MAX_RANGE_DAYS} days"
        )));
    }
    Ok((start, end))
}

/// Trim, drop blanks and duplicates (keeping first occurrence), then check
/// count and format.
pub fn normalize_bulk_numbers(raw: &[String]) -> Result<Vec<String>, CoreError> {
    let mut seen = HashSet::new();
    let numbers: Vec<String> = raw
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_string()))
        .map(str::to_string)
        .collect();

    if numbers.is_empty() {
        return Err(CoreError::Validation(
            "phone_numbers must contain at least one number".into(),
        ));
    }
    if numbers.len() > MAX_BULK_NUMBERS {
        return Err(CoreError::Validation(format!(
            "phone_numbers must not contain more than {MAX_BULK_NUMBERS} numbers"
        )));
    }

    let invalid: Vec<&str> = numbers
        .iter()
        .filter(|n| !PHONE_NUMBER_RE.is_match(n))
        .map(String::as_str)
        .collect();
    if let Some(first) = invalid.first() {
        return Err(CoreError::Validation(format!(
            "{} invalid phone number(s), first: {first}",
            invalid.len()
        )));
    }

    Ok(numbers)
}

fn render_jobs_csv(jobs: &[Job]) -> String {
    let mut csv = CsvWriter::with_header(&[
        "job_id",
        "name",
        "status",
        "total_numbers",
        "success_count",
        "fail_count",
        "created_at",
    ]);
    let (mut total, mut success, mut fail) = (0i64, 0i64, 0i64);
    for job in jobs {
        total += job.total_numbers;
        success += job.success_count;
        fail += job.fail_count;
        csv.push_row([
            job.id.to_string(),
            job.name.clone(),
            job.status.as_str().to_string(),
            job.total_numbers.to_string(),
            job.success_count.to_string(),
            job.fail_count.to_string(),
            job.created_at.to_rfc3339(),
        ]);
    }
    csv.push_row([
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        total.to_string(),
        success.to_string(),
        fail.to_string(),
        String::new(),
    ]);
    csv.finish()
}

fn render_details_csv(details: &[JobDetail]) -> String {
    let mut csv = CsvWriter::with_header(&[
        "phone_number",
        "subscriber_status",
        "operator",
        "device_status",
        "status",
        "message",
        "checked_at",
    ]);
    for d in details {
        let checked_at = d.created_at.to_rfc3339();
        csv.push_row([
            d.phone_number.as_str(),
            d.subscriber_status.as_deref().unwrap_or(""),
            d.operator.as_deref().unwrap_or(""),
            d.device_status.as_deref().unwrap_or(""),
            d.status.as_str(),
            d.message.as_deref().unwrap_or(""),
            checked_at.as_str(),
        ]);
    }
    csv.finish()
}

fn validation(msg: &str) -> AppError {
    AppError::Core(CoreError::Validation(msg.to_string()))
}

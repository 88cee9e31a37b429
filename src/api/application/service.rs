use sqlx::{Pool, Postgres};
use tracing::info;

use crate::api::application::models::ApplicationStatus;
use crate::api::error::{ApiError, conflict_on_unique_violation};
use crate::db::application_repository::ApplicationRepository;
use crate::db::job_repository::JobRepository;
use crate::db::models::{ApplicationRow, CandidateApplicationRow, RecruiterApplicationRow, UserRow};

const ALREADY_APPLIED: &str = "You have already applied for this job";
const RESUME_REQUIRED: &str =
    "Resume is required to apply for jobs. Please upload your resume first.";

/// Application lifecycle business logic
pub struct ApplicationService {
    pool: Pool<Postgres>,
    /// When true, Accepted/Rejected are terminal and cannot be re-decided
    strict_status_transitions: bool,
}

impl ApplicationService {
    pub fn new(pool: Pool<Postgres>, strict_status_transitions: bool) -> Self {
        Self {
            pool,
            strict_status_transitions,
        }
    }

    /// Apply to a job. Preconditions in order, first failure wins:
    /// resume on file, not already applied, job exists. The in-handler
    /// duplicate check is a fast path; the unique index on
    /// (candidate_id, job_id) closes the double-submit race.
    pub async fn apply(
        &self,
        candidate: &UserRow,
        job_id: i32,
    ) -> Result<ApplicationRow, ApiError> {
        if candidate
            .resume_url
            .as_deref()
            .map(str::is_empty)
            .unwrap_or(true)
        {
            return Err(ApiError::Validation(RESUME_REQUIRED.to_string()));
        }

        if ApplicationRepository::exists_for(&self.pool, candidate.id, job_id).await? {
            return Err(ApiError::Conflict(ALREADY_APPLIED.to_string()));
        }

        let job = JobRepository::find_by_id(&self.pool, job_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

        let application =
            ApplicationRepository::create(&self.pool, candidate.id, job.id, job.recruiter_id)
                .await
                .map_err(|e| conflict_on_unique_violation(e, ALREADY_APPLIED))?;

        info!(
            "Service: candidate id={} applied to job id={} (application id={})",
            candidate.id, job.id, application.id
        );
        Ok(application)
    }

    pub async fn list_for_candidate(
        &self,
        candidate_id: i32,
    ) -> Result<Vec<CandidateApplicationRow>, ApiError> {
        Ok(ApplicationRepository::list_for_candidate(&self.pool, candidate_id).await?)
    }

    /// Withdraw an own application while it is still Pending
    pub async fn withdraw(
        &self,
        candidate_id: i32,
        application_id: i32,
    ) -> Result<(), ApiError> {
        let application =
            ApplicationRepository::find_owned_by_candidate(&self.pool, application_id, candidate_id)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound(
                        "Application not found or you don't have permission to withdraw it"
                            .to_string(),
                    )
                })?;

        let status = ApplicationStatus::parse(&application.status);
        if !status.map(|s| s.can_withdraw()).unwrap_or(false) {
            return Err(ApiError::State(format!(
                "Cannot withdraw application. Status has already been changed to \"{}\" by the recruiter.",
                application.status
            )));
        }

        let deleted =
            ApplicationRepository::delete_pending(&self.pool, application_id, candidate_id).await?;

        if !deleted {
            // Lost a race: the row was decided or removed after the read
            return match ApplicationRepository::find_owned_by_candidate(
                &self.pool,
                application_id,
                candidate_id,
            )
            .await?
            {
                Some(current) => Err(ApiError::State(format!(
                    "Cannot withdraw application. Status has already been changed to \"{}\" by the recruiter.",
                    current.status
                ))),
                None => Err(ApiError::NotFound("Application not found".to_string())),
            };
        }

        info!(
            "Service: candidate id={} withdrew application id={}",
            candidate_id, application_id
        );
        Ok(())
    }

    pub async fn list_for_recruiter(
        &self,
        recruiter_id: i32,
    ) -> Result<Vec<RecruiterApplicationRow>, ApiError> {
        Ok(ApplicationRepository::list_for_recruiter(&self.pool, recruiter_id).await?)
    }

    /// Applications for one job; the job must be owned by the recruiter
    /// (a foreign job reports NotFound, never Forbidden)
    pub async fn list_for_job(
        &self,
        recruiter_id: i32,
        job_id: i32,
    ) -> Result<Vec<RecruiterApplicationRow>, ApiError> {
        JobRepository::find_owned(&self.pool, job_id, recruiter_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(
                    "Job not found or you don't have permission to view its applications"
                        .to_string(),
                )
            })?;

        Ok(ApplicationRepository::list_for_job(&self.pool, job_id).await?)
    }

    /// Decide an application. Ownership rides on the denormalized
    /// recruiter column, so an application withdrawn concurrently
    /// reports NotFound rather than silently succeeding.
    pub async fn update_status(
        &self,
        recruiter_id: i32,
        application_id: i32,
        status: ApplicationStatus,
    ) -> Result<RecruiterApplicationRow, ApiError> {
        let application = ApplicationRepository::find_owned_by_recruiter(
            &self.pool,
            application_id,
            recruiter_id,
        )
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(
                "Application not found or has been withdrawn by the user".to_string(),
            )
        })?;

        let current = ApplicationStatus::parse(&application.status);
        if !current
            .map(|s| s.can_decide(self.strict_status_transitions))
            .unwrap_or(false)
        {
            return Err(ApiError::State(format!(
                "Application status has already been decided as \"{}\"",
                application.status
            )));
        }

        let updated = ApplicationRepository::update_status(
            &self.pool,
            application_id,
            recruiter_id,
            status.as_str(),
        )
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(
                "Application not found or has been withdrawn by the user".to_string(),
            )
        })?;

        info!(
            "Service: recruiter id={} set application id={} to {}",
            recruiter_id, application_id, status
        );
        Ok(updated)
    }
}

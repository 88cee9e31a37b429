use sqlx::{Pool, Postgres};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::job::dto::{CreateJobRequest, UpdateJobRequest};
use crate::api::job::models::merge_job_update;
use crate::db::job_repository::JobRepository;
use crate::db::models::{JobRow, JobWithApplicantsRow, JobWithRecruiterRow};

const JOB_NOT_FOUND: &str = "Job not found";

/// Job catalog business logic
pub struct JobService {
    pool: Pool<Postgres>,
}

impl JobService {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Public catalog: visible jobs with recruiter public fields,
    /// newest-first
    pub async fn list_visible(&self) -> Result<Vec<JobWithRecruiterRow>, ApiError> {
        Ok(JobRepository::list_visible_with_recruiter(&self.pool).await?)
    }

    pub async fn create(
        &self,
        recruiter_id: i32,
        req: &CreateJobRequest,
    ) -> Result<JobRow, ApiError> {
        info!(
            "Service: recruiter id={} creating job \"{}\"",
            recruiter_id, req.title
        );

        let job = JobRepository::create(
            &self.pool,
            recruiter_id,
            &req.title,
            &req.location,
            &req.level,
            &req.description,
            req.salary,
            &req.category,
        )
        .await?;

        info!("Service: job created with id={}", job.id);
        Ok(job)
    }

    pub async fn list_own(
        &self,
        recruiter_id: i32,
    ) -> Result<Vec<JobWithApplicantsRow>, ApiError> {
        Ok(JobRepository::list_by_recruiter_with_counts(&self.pool, recruiter_id).await?)
    }

    /// Permissive partial update of an owned job. A job owned by another
    /// recruiter reports NotFound, never Forbidden.
    pub async fn update(
        &self,
        recruiter_id: i32,
        job_id: i32,
        patch: &UpdateJobRequest,
    ) -> Result<JobRow, ApiError> {
        let existing = JobRepository::find_owned(&self.pool, job_id, recruiter_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(JOB_NOT_FOUND.to_string()))?;

        let merged = merge_job_update(&existing, patch);

        let updated = JobRepository::update_owned(
            &self.pool,
            job_id,
            recruiter_id,
            &merged.title,
            &merged.location,
            &merged.level,
            &merged.description,
            merged.salary,
            &merged.category,
            merged.visible,
        )
        .await?
        // Deleted between the read and the write: report as absent
        .ok_or_else(|| ApiError::NotFound(JOB_NOT_FOUND.to_string()))?;

        info!("Service: job id={} updated", updated.id);
        Ok(updated)
    }

    /// Delete an owned job and all applications referencing it as one
    /// logical unit
    pub async fn delete(&self, recruiter_id: i32, job_id: i32) -> Result<(), ApiError> {
        let deleted =
            JobRepository::delete_owned_with_applications(&self.pool, job_id, recruiter_id)
                .await?;

        if !deleted {
            return Err(ApiError::NotFound(JOB_NOT_FOUND.to_string()));
        }

        info!("Service: job id={} and its applications deleted", job_id);
        Ok(())
    }
}

use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::{ApplicationRow, CandidateApplicationRow, RecruiterApplicationRow};

const CANDIDATE_SELECT: &str = r#"
    SELECT a.id, a.status, a.created_at,
           j.id AS job_id,
           j.title AS job_title,
           j.location AS job_location,
           j.created_at AS job_created_at,
           u.id AS recruiter_id,
           u.name AS recruiter_name,
           u.email AS recruiter_email,
           u.image_url AS recruiter_image
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
    JOIN users u ON u.id = a.recruiter_id
"#;

const RECRUITER_SELECT: &str = r#"
    SELECT a.id, a.status, a.created_at,
           j.id AS job_id,
           j.title AS job_title,
           j.location AS job_location,
           j.salary AS job_salary,
           u.id AS candidate_id,
           u.name AS candidate_name,
           u.email AS candidate_email,
           u.image_url AS candidate_image,
           u.resume_url AS candidate_resume
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
    JOIN users u ON u.id = a.candidate_id
"#;

/// Repository for job application database operations
///
/// Candidate-side mutations key on `(id, candidate_id)`, recruiter-side
/// mutations on `(id, recruiter_id)` via the denormalized owner column,
/// so ownership and existence collapse into one check.
pub struct ApplicationRepository;

impl ApplicationRepository {
    /// Insert a Pending application, denormalizing the job's owner.
    ///
    /// The UNIQUE (candidate_id, job_id) constraint is the real guard
    /// against double-apply; callers map the unique violation to a
    /// conflict error.
    pub async fn create(
        pool: &Pool<Postgres>,
        candidate_id: i32,
        job_id: i32,
        recruiter_id: i32,
    ) -> Result<ApplicationRow, sqlx::Error> {
        debug!(
            "Creating application: candidate_id={}, job_id={}",
            candidate_id, job_id
        );

        sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO applications (candidate_id, job_id, recruiter_id)
            VALUES ($1, $2, $3)
            RETURNING id, candidate_id, job_id, recruiter_id, status, created_at
            "#,
        )
        .bind(candidate_id)
        .bind(job_id)
        .bind(recruiter_id)
        .fetch_one(pool)
        .await
    }

    /// Fast-path duplicate check; the unique index remains the backstop
    pub async fn exists_for(
        pool: &Pool<Postgres>,
        candidate_id: i32,
        job_id: i32,
    ) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(
            "SELECT 1 FROM applications WHERE candidate_id = $1 AND job_id = $2",
        )
        .bind(candidate_id)
        .bind(job_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.is_some())
    }

    /// Fetch an application only if it belongs to the given candidate
    pub async fn find_owned_by_candidate(
        pool: &Pool<Postgres>,
        application_id: i32,
        candidate_id: i32,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, candidate_id, job_id, recruiter_id, status, created_at
            FROM applications
            WHERE id = $1 AND candidate_id = $2
            "#,
        )
        .bind(application_id)
        .bind(candidate_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a candidate-owned application, but only while it is still
    /// Pending. Returns false when the row was already decided or gone,
    /// so a concurrent status change loses cleanly.
    pub async fn delete_pending(
        pool: &Pool<Postgres>,
        application_id: i32,
        candidate_id: i32,
    ) -> Result<bool, sqlx::Error> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM applications
            WHERE id = $1 AND candidate_id = $2 AND status = 'Pending'
            "#,
        )
        .bind(application_id)
        .bind(candidate_id)
        .execute(pool)
        .await?
        .rows_affected();

        debug!(
            "Withdraw application id={}: deleted={}",
            application_id,
            deleted > 0
        );
        Ok(deleted > 0)
    }

    /// All applications by a candidate, joined, newest-first
    pub async fn list_for_candidate(
        pool: &Pool<Postgres>,
        candidate_id: i32,
    ) -> Result<Vec<CandidateApplicationRow>, sqlx::Error> {
        let query = format!(
            "{CANDIDATE_SELECT} WHERE a.candidate_id = $1 ORDER BY a.created_at DESC"
        );

        sqlx::query_as::<_, CandidateApplicationRow>(&query)
            .bind(candidate_id)
            .fetch_all(pool)
            .await
    }

    /// All applications owned by a recruiter, joined, newest-first
    pub async fn list_for_recruiter(
        pool: &Pool<Postgres>,
        recruiter_id: i32,
    ) -> Result<Vec<RecruiterApplicationRow>, sqlx::Error> {
        let query = format!(
            "{RECRUITER_SELECT} WHERE a.recruiter_id = $1 ORDER BY a.created_at DESC"
        );

        sqlx::query_as::<_, RecruiterApplicationRow>(&query)
            .bind(recruiter_id)
            .fetch_all(pool)
            .await
    }

    /// Applications for a single job, joined, newest-first. Callers must
    /// have already verified job ownership.
    pub async fn list_for_job(
        pool: &Pool<Postgres>,
        job_id: i32,
    ) -> Result<Vec<RecruiterApplicationRow>, sqlx::Error> {
        let query = format!("{RECRUITER_SELECT} WHERE a.job_id = $1 ORDER BY a.created_at DESC");

        sqlx::query_as::<_, RecruiterApplicationRow>(&query)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch an application only if the recruiter owns the referenced job
    /// (via the denormalized owner column)
    pub async fn find_owned_by_recruiter(
        pool: &Pool<Postgres>,
        application_id: i32,
        recruiter_id: i32,
    ) -> Result<Option<ApplicationRow>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, candidate_id, job_id, recruiter_id, status, created_at
            FROM applications
            WHERE id = $1 AND recruiter_id = $2
            "#,
        )
        .bind(application_id)
        .bind(recruiter_id)
        .fetch_optional(pool)
        .await
    }

    /// Set the status of a recruiter-owned application and return the
    /// joined record. Returns None when the application no longer exists
    /// (e.g. withdrawn concurrently) or is not owned by the recruiter.
    pub async fn update_status(
        pool: &Pool<Postgres>,
        application_id: i32,
        recruiter_id: i32,
        status: &str,
    ) -> Result<Option<RecruiterApplicationRow>, sqlx::Error> {
        debug!(
            "Updating application id={} to status={}",
            application_id, status
        );

        let updated = sqlx::query(
            r#"
            UPDATE applications
            SET status = $3
            WHERE id = $1 AND recruiter_id = $2
            "#,
        )
        .bind(application_id)
        .bind(recruiter_id)
        .bind(status)
        .execute(pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }

        let query = format!("{RECRUITER_SELECT} WHERE a.id = $1");

        sqlx::query_as::<_, RecruiterApplicationRow>(&query)
            .bind(application_id)
            .fetch_optional(pool)
            .await
    }
}

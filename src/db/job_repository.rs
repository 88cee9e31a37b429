use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::{JobRow, JobWithApplicantsRow, JobWithRecruiterRow};

/// Repository for job posting database operations
///
/// Every mutation is keyed on `(id, recruiter_id)` in a single predicate:
/// a job that exists but belongs to another recruiter is indistinguishable
/// from one that does not exist.
pub struct JobRepository;

impl JobRepository {
    /// Insert a new job posting and return the full job record
    pub async fn create(
        pool: &Pool<Postgres>,
        recruiter_id: i32,
        title: &str,
        location: &str,
        level: &str,
        description: &str,
        salary: i64,
        category: &str,
    ) -> Result<JobRow, sqlx::Error> {
        debug!("Creating job: title={}, recruiter_id={}", title, recruiter_id);

        sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (title, location, level, description, salary, category, recruiter_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, location, level, description, salary, category,
                      recruiter_id, visible, created_at
            "#,
        )
        .bind(title)
        .bind(location)
        .bind(level)
        .bind(description)
        .bind(salary)
        .bind(category)
        .bind(recruiter_id)
        .fetch_one(pool)
        .await
    }

    /// All visible jobs joined with recruiter public fields, newest-first
    pub async fn list_visible_with_recruiter(
        pool: &Pool<Postgres>,
    ) -> Result<Vec<JobWithRecruiterRow>, sqlx::Error> {
        sqlx::query_as::<_, JobWithRecruiterRow>(
            r#"
            SELECT j.id, j.title, j.location, j.level, j.description, j.salary,
                   j.category, j.recruiter_id, j.visible, j.created_at,
                   u.name AS recruiter_name,
                   u.email AS recruiter_email,
                   u.image_url AS recruiter_image
            FROM jobs j
            JOIN users u ON u.id = j.recruiter_id
            WHERE j.visible = TRUE
            ORDER BY j.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// All jobs owned by a recruiter, each with its live application count,
    /// newest-first
    pub async fn list_by_recruiter_with_counts(
        pool: &Pool<Postgres>,
        recruiter_id: i32,
    ) -> Result<Vec<JobWithApplicantsRow>, sqlx::Error> {
        sqlx::query_as::<_, JobWithApplicantsRow>(
            r#"
            SELECT j.id, j.title, j.location, j.level, j.description, j.salary,
                   j.category, j.recruiter_id, j.visible, j.created_at,
                   COUNT(a.id) AS applicants
            FROM jobs j
            LEFT JOIN applications a ON a.job_id = j.id
            WHERE j.recruiter_id = $1
            GROUP BY j.id
            ORDER BY j.created_at DESC
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(pool)
        .await
    }

    /// Fetch a job only if it is owned by the given recruiter
    pub async fn find_owned(
        pool: &Pool<Postgres>,
        job_id: i32,
        recruiter_id: i32,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, location, level, description, salary, category,
                   recruiter_id, visible, created_at
            FROM jobs
            WHERE id = $1 AND recruiter_id = $2
            "#,
        )
        .bind(job_id)
        .bind(recruiter_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &Pool<Postgres>,
        job_id: i32,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, location, level, description, salary, category,
                   recruiter_id, visible, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(pool)
        .await
    }

    /// Write the merged field set back to an owned job
    #[allow(clippy::too_many_arguments)]
    pub async fn update_owned(
        pool: &Pool<Postgres>,
        job_id: i32,
        recruiter_id: i32,
        title: &str,
        location: &str,
        level: &str,
        description: &str,
        salary: i64,
        category: &str,
        visible: bool,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        debug!("Updating job id={} recruiter_id={}", job_id, recruiter_id);

        sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET title = $3, location = $4, level = $5, description = $6,
                salary = $7, category = $8, visible = $9
            WHERE id = $1 AND recruiter_id = $2
            RETURNING id, title, location, level, description, salary, category,
                      recruiter_id, visible, created_at
            "#,
        )
        .bind(job_id)
        .bind(recruiter_id)
        .bind(title)
        .bind(location)
        .bind(level)
        .bind(description)
        .bind(salary)
        .bind(category)
        .bind(visible)
        .fetch_optional(pool)
        .await
    }

    /// Delete an owned job together with every application referencing it.
    ///
    /// Both deletes run in one transaction so a failure partway cannot
    /// leave orphaned applications pointing at a deleted job. Returns
    /// false when no job matched the ownership predicate.
    pub async fn delete_owned_with_applications(
        pool: &Pool<Postgres>,
        job_id: i32,
        recruiter_id: i32,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owned = sqlx::query("SELECT 1 FROM jobs WHERE id = $1 AND recruiter_id = $2 FOR UPDATE")
            .bind(job_id)
            .bind(recruiter_id)
            .fetch_optional(&mut *tx)
            .await?;

        if owned.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Deleted job id={} and its applications", job_id);
        Ok(true)
    }
}

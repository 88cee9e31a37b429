use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database representation of a user with all fields
///
/// The password hash never leaves the db layer; response DTOs are built
/// from the public fields only.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image_url: String,
    pub role: String,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database representation of a job posting
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub level: String,
    pub description: String,
    pub salary: i64,
    pub category: String,
    pub recruiter_id: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

/// Database representation of a job application
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: i32,
    pub candidate_id: i32,
    pub job_id: i32,
    pub recruiter_id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Visible job joined with its recruiter's public fields
#[derive(Debug, Clone, FromRow)]
pub struct JobWithRecruiterRow {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub level: String,
    pub description: String,
    pub salary: i64,
    pub category: String,
    pub recruiter_id: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub recruiter_name: String,
    pub recruiter_email: String,
    pub recruiter_image: String,
}

/// Recruiter-owned job annotated with its live application count
#[derive(Debug, Clone, FromRow)]
pub struct JobWithApplicantsRow {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub level: String,
    pub description: String,
    pub salary: i64,
    pub category: String,
    pub recruiter_id: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub applicants: i64,
}

/// Candidate-side application joined with job snapshot and recruiter
/// public fields
#[derive(Debug, Clone, FromRow)]
pub struct CandidateApplicationRow {
    pub id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub job_id: i32,
    pub job_title: String,
    pub job_location: String,
    pub job_created_at: DateTime<Utc>,
    pub recruiter_id: i32,
    pub recruiter_name: String,
    pub recruiter_email: String,
    pub recruiter_image: String,
}

/// Recruiter-side application joined with candidate public fields
/// (resume included) and job snapshot
#[derive(Debug, Clone, FromRow)]
pub struct RecruiterApplicationRow {
    pub id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub job_id: i32,
    pub job_title: String,
    pub job_location: String,
    pub job_salary: i64,
    pub candidate_id: i32,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_image: String,
    pub candidate_resume: Option<String>,
}

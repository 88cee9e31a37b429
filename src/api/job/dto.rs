use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::{JobRow, JobWithApplicantsRow, JobWithRecruiterRow};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "Job title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Job location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Job level is required"))]
    pub level: String,
    #[validate(length(min = 1, message = "Job description is required"))]
    pub description: String,
    #[validate(range(min = 1, message = "Job salary is required"))]
    pub salary: i64,
    #[validate(length(min = 1, message = "Job category is required"))]
    pub category: String,
}

/// Partial update; merge semantics live in models::merge_job_update
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub salary: Option<i64>,
    pub category: Option<String>,
    pub visible: Option<bool>,
}

/// Recruiter fields embedded in public job listings (password never
/// present by construction)
#[derive(Debug, Serialize)]
pub struct RecruiterPublic {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub level: String,
    pub description: String,
    pub salary: i64,
    pub category: String,
    pub visible: bool,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<RecruiterPublic>,
}

impl From<&JobRow> for JobDto {
    fn from(row: &JobRow) -> Self {
        JobDto {
            id: row.id,
            title: row.title.clone(),
            location: row.location.clone(),
            level: row.level.clone(),
            description: row.description.clone(),
            salary: row.salary,
            category: row.category.clone(),
            visible: row.visible,
            date: row.created_at,
            recruiter: None,
        }
    }
}

impl From<&JobWithRecruiterRow> for JobDto {
    fn from(row: &JobWithRecruiterRow) -> Self {
        JobDto {
            id: row.id,
            title: row.title.clone(),
            location: row.location.clone(),
            level: row.level.clone(),
            description: row.description.clone(),
            salary: row.salary,
            category: row.category.clone(),
            visible: row.visible,
            date: row.created_at,
            recruiter: Some(RecruiterPublic {
                id: row.recruiter_id,
                name: row.recruiter_name.clone(),
                email: row.recruiter_email.clone(),
                image: row.recruiter_image.clone(),
            }),
        }
    }
}

/// Recruiter's own job annotated with its live applicant count
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnJobDto {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub level: String,
    pub description: String,
    pub salary: i64,
    pub category: String,
    pub visible: bool,
    pub date: DateTime<Utc>,
    pub applicants: i64,
}

impl From<&JobWithApplicantsRow> for OwnJobDto {
    fn from(row: &JobWithApplicantsRow) -> Self {
        OwnJobDto {
            id: row.id,
            title: row.title.clone(),
            location: row.location.clone(),
            level: row.level.clone(),
            description: row.description.clone(),
            salary: row.salary,
            category: row.category.clone(),
            visible: row.visible,
            date: row.created_at,
            applicants: row.applicants,
        }
    }
}

/// Envelope for the public catalog
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub success: bool,
    pub job_data: Vec<JobDto>,
}

/// Envelope for create/update of a single job
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub success: bool,
    pub message: String,
    pub job_data: JobDto,
}

/// Envelope for the recruiter's own listings
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnJobsResponse {
    pub success: bool,
    pub jobs_data: Vec<OwnJobDto>,
}

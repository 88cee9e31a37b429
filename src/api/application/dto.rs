use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::application::models::ApplicationStatus;
use crate::db::models::{ApplicationRow, CandidateApplicationRow, RecruiterApplicationRow};

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyRequest {
    #[serde(rename = "jobId")]
    pub job_id: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// The bare application record returned on creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDto {
    pub id: i32,
    pub job_id: i32,
    pub status: String,
    pub date: DateTime<Utc>,
}

impl From<&ApplicationRow> for ApplicationDto {
    fn from(row: &ApplicationRow) -> Self {
        ApplicationDto {
            id: row.id,
            job_id: row.job_id,
            status: row.status.clone(),
            date: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub id: i32,
    pub title: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecruiterPublic {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image: String,
}

/// Candidate public fields as seen by a recruiter reviewing applicants;
/// includes the resume URL
#[derive(Debug, Serialize)]
pub struct CandidatePublic {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

/// Candidate's view of one of their applications
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplicationDto {
    pub id: i32,
    pub status: String,
    pub date: DateTime<Utc>,
    pub job: JobSnapshot,
    pub recruiter: RecruiterPublic,
}

impl From<&CandidateApplicationRow> for CandidateApplicationDto {
    fn from(row: &CandidateApplicationRow) -> Self {
        CandidateApplicationDto {
            id: row.id,
            status: row.status.clone(),
            date: row.created_at,
            job: JobSnapshot {
                id: row.job_id,
                title: row.job_title.clone(),
                location: row.job_location.clone(),
                date: Some(row.job_created_at),
                salary: None,
            },
            recruiter: RecruiterPublic {
                id: row.recruiter_id,
                name: row.recruiter_name.clone(),
                email: row.recruiter_email.clone(),
                image: row.recruiter_image.clone(),
            },
        }
    }
}

/// Recruiter's view of an application to one of their jobs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterApplicationDto {
    pub id: i32,
    pub status: String,
    pub date: DateTime<Utc>,
    pub job: JobSnapshot,
    pub candidate: CandidatePublic,
}

impl From<&RecruiterApplicationRow> for RecruiterApplicationDto {
    fn from(row: &RecruiterApplicationRow) -> Self {
        RecruiterApplicationDto {
            id: row.id,
            status: row.status.clone(),
            date: row.created_at,
            job: JobSnapshot {
                id: row.job_id,
                title: row.job_title.clone(),
                location: row.job_location.clone(),
                date: None,
                salary: Some(row.job_salary),
            },
            candidate: CandidatePublic {
                id: row.candidate_id,
                name: row.candidate_name.clone(),
                email: row.candidate_email.clone(),
                image: row.candidate_image.clone(),
                resume: row.candidate_resume.clone(),
            },
        }
    }
}

/// Envelope for a freshly created application
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResponse {
    pub success: bool,
    pub message: String,
    pub job_application: ApplicationDto,
}

/// Envelope for a candidate's own applications
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserApplicationsResponse {
    pub success: bool,
    pub job_applications: Vec<CandidateApplicationDto>,
}

/// Envelope for recruiter-side application listings
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsDataResponse {
    pub success: bool,
    pub applications_data: Vec<RecruiterApplicationDto>,
}

/// Envelope for a status update
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub message: String,
    pub application_data: RecruiterApplicationDto,
}

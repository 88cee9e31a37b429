use actix_web::{
    HttpResponse, delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::Json;

use crate::api::MessageResponse;
use crate::api::auth::extractor::RecruiterSession;
use crate::api::error::ApiError;
use crate::api::job::dto::{
    CreateJobRequest, JobDto, JobListResponse, JobResponse, OwnJobDto, OwnJobsResponse,
    UpdateJobRequest,
};
use crate::api::job::service::JobService;

#[get("/all-jobs")]
async fn all_jobs(service: Data<JobService>) -> Result<HttpResponse, ApiError> {
    let jobs = service.list_visible().await?;

    Ok(HttpResponse::Ok().json(JobListResponse {
        success: true,
        job_data: jobs.iter().map(JobDto::from).collect(),
    }))
}

#[post("/add")]
async fn add_job(
    session: RecruiterSession,
    body: Json<CreateJobRequest>,
    service: Data<JobService>,
) -> Result<HttpResponse, ApiError> {
    let job = service.create(session.0.id, &body).await?;

    Ok(HttpResponse::Created().json(JobResponse {
        success: true,
        message: "Job added successfully".to_string(),
        job_data: JobDto::from(&job),
    }))
}

#[get("/recruiter-jobs")]
async fn recruiter_jobs(
    session: RecruiterSession,
    service: Data<JobService>,
) -> Result<HttpResponse, ApiError> {
    let jobs = service.list_own(session.0.id).await?;

    Ok(HttpResponse::Ok().json(OwnJobsResponse {
        success: true,
        jobs_data: jobs.iter().map(OwnJobDto::from).collect(),
    }))
}

#[put("/update/{job_id}")]
async fn update_job(
    session: RecruiterSession,
    path: Path<i32>,
    body: Json<UpdateJobRequest>,
    service: Data<JobService>,
) -> Result<HttpResponse, ApiError> {
    let job = service
        .update(session.0.id, path.into_inner(), &body)
        .await?;

    Ok(HttpResponse::Ok().json(JobResponse {
        success: true,
        message: "Job updated successfully".to_string(),
        job_data: JobDto::from(&job),
    }))
}

#[delete("/delete/{job_id}")]
async fn delete_job(
    session: RecruiterSession,
    path: Path<i32>,
    service: Data<JobService>,
) -> Result<HttpResponse, ApiError> {
    service.delete(session.0.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Job and all related applications deleted successfully",
    )))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("job")
            .service(all_jobs)
            .service(add_job)
            .service(recruiter_jobs)
            .service(update_job)
            .service(delete_job),
    );
}

use actix_web::{
    HttpResponse, delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::Json;

use crate::api::MessageResponse;
use crate::api::application::dto::{
    ApplicationDto, ApplicationsDataResponse, ApplyRequest, ApplyResponse,
    CandidateApplicationDto, RecruiterApplicationDto, UpdateStatusRequest, UpdateStatusResponse,
    UserApplicationsResponse,
};
use crate::api::application::service::ApplicationService;
use crate::api::auth::extractor::{CandidateSession, RecruiterSession};
use crate::api::error::ApiError;

#[post("/apply")]
async fn apply(
    session: CandidateSession,
    body: Json<ApplyRequest>,
    service: Data<ApplicationService>,
) -> Result<HttpResponse, ApiError> {
    let application = service.apply(&session.0, body.job_id).await?;

    Ok(HttpResponse::Created().json(ApplyResponse {
        success: true,
        message: "Job applied successfully".to_string(),
        job_application: ApplicationDto::from(&application),
    }))
}

#[get("/user-applications")]
async fn user_applications(
    session: CandidateSession,
    service: Data<ApplicationService>,
) -> Result<HttpResponse, ApiError> {
    let applications = service.list_for_candidate(session.0.id).await?;

    Ok(HttpResponse::Ok().json(UserApplicationsResponse {
        success: true,
        job_applications: applications
            .iter()
            .map(CandidateApplicationDto::from)
            .collect(),
    }))
}

#[delete("/withdraw/{application_id}")]
async fn withdraw(
    session: CandidateSession,
    path: Path<i32>,
    service: Data<ApplicationService>,
) -> Result<HttpResponse, ApiError> {
    service.withdraw(session.0.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Application withdrawn successfully")))
}

#[get("/recruiter-applications")]
async fn recruiter_applications(
    session: RecruiterSession,
    service: Data<ApplicationService>,
) -> Result<HttpResponse, ApiError> {
    let applications = service.list_for_recruiter(session.0.id).await?;

    Ok(HttpResponse::Ok().json(ApplicationsDataResponse {
        success: true,
        applications_data: applications
            .iter()
            .map(RecruiterApplicationDto::from)
            .collect(),
    }))
}

#[get("/job/{job_id}")]
async fn job_applications(
    session: RecruiterSession,
    path: Path<i32>,
    service: Data<ApplicationService>,
) -> Result<HttpResponse, ApiError> {
    let applications = service.list_for_job(session.0.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApplicationsDataResponse {
        success: true,
        applications_data: applications
            .iter()
            .map(RecruiterApplicationDto::from)
            .collect(),
    }))
}

#[put("/update-status/{application_id}")]
async fn update_status(
    session: RecruiterSession,
    path: Path<i32>,
    body: Json<UpdateStatusRequest>,
    service: Data<ApplicationService>,
) -> Result<HttpResponse, ApiError> {
    let application = service
        .update_status(session.0.id, path.into_inner(), body.status)
        .await?;

    Ok(HttpResponse::Ok().json(UpdateStatusResponse {
        success: true,
        message: "Application status updated successfully".to_string(),
        application_data: RecruiterApplicationDto::from(&application),
    }))
}

pub fn application_config(config: &mut ServiceConfig) {
    config.service(
        scope("applications")
            .service(apply)
            .service(user_applications)
            .service(withdraw)
            .service(recruiter_applications)
            .service(job_applications)
            .service(update_status),
    );
}

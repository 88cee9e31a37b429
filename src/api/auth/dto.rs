use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::auth::models::PublicUser;

/// Registration form (multipart: profile image + text fields).
///
/// Every field is optional at the extractor level so missing fields get
/// the ordered, human-readable validation messages instead of a generic
/// multipart error.
#[derive(MultipartForm)]
pub struct RegisterForm {
    pub name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub password: Option<Text<String>>,
    #[multipart(rename = "userType")]
    pub user_type: Option<Text<String>>,
    pub image: Option<TempFile>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(rename = "userType")]
    #[validate(length(min = 1, message = "Please select a valid user type"))]
    pub user_type: String,
}

#[derive(MultipartForm)]
pub struct ResumeForm {
    pub resume: Option<TempFile>,
}

/// Envelope for register/login: user data plus a message
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user_data: PublicUser,
}

/// Envelope for the current-user endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataResponse {
    pub success: bool,
    pub user_data: PublicUser,
}

/// Envelope for resume upload
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub success: bool,
    pub message: String,
    pub resume_url: String,
}

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

/// Uniform JSON envelope for failed requests
#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Request-level errors shared by every handler
///
/// Ownership failures are reported as NotFound rather than Forbidden:
/// a resource that exists but belongs to someone else is indistinguishable
/// from one that does not exist. Forbidden is reserved for role mismatches
/// on an authenticated session.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input (400)
    Validation(String),

    /// Missing or invalid credentials or session (401)
    Auth(String),

    /// Authenticated but wrong role (403)
    Forbidden(String),

    /// Resource absent or not owned (404)
    NotFound(String),

    /// Duplicate email or duplicate application (409)
    Conflict(String),

    /// Operation invalid for the current lifecycle state (400)
    State(String),

    /// Store failure (500); details are logged, not exposed
    Database(sqlx::Error),

    /// Media host failure (500); details are logged, not exposed
    Media(String),

    /// Unexpected server-side failure (500); details are logged, not exposed
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Auth(msg) => write!(f, "Authentication error: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::State(msg) => write!(f, "Invalid state: {}", msg),
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::Media(msg) => write!(f, "Media host error: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::State(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Media(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                "An unexpected error occurred. Please try again later.".to_string()
            }
            ApiError::Media(msg) => {
                error!("Media host error: {}", msg);
                "File upload failed. Please try again later.".to_string()
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                "An unexpected error occurred. Please try again later.".to_string()
            }
            ApiError::Validation(msg)
            | ApiError::Auth(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::State(msg) => {
                warn!("{}", self);
                msg.clone()
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorBody::new(message))
    }
}

/// Map a unique-constraint violation to the given conflict error,
/// leaving every other database error untouched
pub fn conflict_on_unique_violation(e: sqlx::Error, message: &str) -> ApiError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::Conflict(message.to_string())
        }
        _ => ApiError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Auth("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::State("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn database_errors_do_not_leak_details() {
        let err = ApiError::Database(sqlx::Error::PoolClosed);
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["success"], false);
        let message = value["message"].as_str().expect("message");
        assert!(!message.to_lowercase().contains("pool"));
    }

    #[test]
    fn unique_violations_become_conflicts_only() {
        let err = conflict_on_unique_violation(sqlx::Error::PoolClosed, "duplicate");
        assert!(matches!(err, ApiError::Database(_)));
    }
}

use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tracing::info;

use crate::api::auth::models::UserRole;
use crate::api::auth::password::{hash_password, verify_password};
use crate::api::error::{ApiError, conflict_on_unique_violation};
use crate::db::models::UserRow;
use crate::db::user_repository::UserRepository;
use crate::media::{MediaStore, UploadedFile};

const EMAIL_TAKEN: &str = "An account with this email already exists. \
     Please use a different email or try logging in instead.";

/// Unknown email and role mismatch share one message so the API does not
/// reveal which emails exist under which role
const INVALID_LOGIN: &str = "No account matches this email and user type";

/// Identity and session business logic
pub struct UserService {
    pool: Pool<Postgres>,
    media: Arc<dyn MediaStore>,
}

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub image: UploadedFile,
}

impl UserService {
    pub fn new(pool: Pool<Postgres>, media: Arc<dyn MediaStore>) -> Self {
        Self { pool, media }
    }

    /// Register a new user: reject duplicate emails, hash the password,
    /// forward the profile image to the media host, persist.
    ///
    /// The handler has already run the field-presence and file checks;
    /// the unique constraint on email backs up the duplicate check here.
    pub async fn register(&self, input: RegisterInput) -> Result<UserRow, ApiError> {
        info!("Service: registering {} as {}", input.email, input.role);

        if UserRepository::find_by_email(&self.pool, &input.email)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))?;

        let image_url = self
            .media
            .upload(&input.image.filename, &input.image.content_type, input.image.bytes)
            .await?;

        let user = UserRepository::create(
            &self.pool,
            &input.name,
            &input.email,
            &password_hash,
            &image_url,
            input.role.as_str(),
        )
        .await
        .map_err(|e| conflict_on_unique_violation(e, EMAIL_TAKEN))?;

        info!("Service: registered user id={}", user.id);
        Ok(user)
    }

    /// Authenticate email + password + requested role
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        user_type: &str,
    ) -> Result<UserRow, ApiError> {
        let role = UserRole::parse(user_type).ok_or_else(|| {
            ApiError::Validation("Please select a valid user type".to_string())
        })?;

        let user = UserRepository::find_by_email(&self.pool, email)
            .await?
            .ok_or_else(|| ApiError::Auth(INVALID_LOGIN.to_string()))?;

        // Role mismatch reports exactly like an unknown email
        if user.role != role.as_str() {
            return Err(ApiError::Auth(INVALID_LOGIN.to_string()));
        }

        if !verify_password(password, &user.password_hash) {
            return Err(ApiError::Auth("Invalid credentials".to_string()));
        }

        info!("Service: user id={} logged in", user.id);
        Ok(user)
    }

    /// Forward a validated resume to the media host and store the
    /// durable URL on the user
    pub async fn upload_resume(
        &self,
        user_id: i32,
        resume: UploadedFile,
    ) -> Result<String, ApiError> {
        let resume_url = self
            .media
            .upload(&resume.filename, &resume.content_type, resume.bytes)
            .await?;

        let user = UserRepository::set_resume(&self.pool, user_id, &resume_url)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!("Service: stored resume for user id={}", user.id);
        Ok(resume_url)
    }
}

pub mod application;
pub mod auth;
pub mod error;
pub mod health;
pub mod job;
pub mod validation;

use serde::Serialize;

/// Success envelope for operations that return only a message
#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

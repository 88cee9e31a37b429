pub mod dto;
pub mod handlers;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use handlers::application_config;
pub use models::ApplicationStatus;
pub use service::ApplicationService;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::error::ApiError;

/// What kind of file a client is uploading; drives the MIME allow-list
/// and the error wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProfileImage,
    Resume,
}

impl UploadKind {
    pub fn allowed_types(&self) -> &'static [&'static str] {
        match self {
            UploadKind::ProfileImage => {
                &["image/jpeg", "image/jpg", "image/png", "image/webp"]
            }
            UploadKind::Resume => &["application/pdf"],
        }
    }
}

/// Validate an upload's MIME type and size before it is forwarded to the
/// media host. Runs entirely in this crate; the host is never contacted
/// for a file that fails here.
pub fn check_upload(
    kind: UploadKind,
    content_type: Option<&str>,
    size: usize,
    max_size: usize,
) -> Result<(), ApiError> {
    let allowed = kind.allowed_types();
    match content_type {
        Some(ct) if allowed.contains(&ct) => {}
        _ => {
            let message = match kind {
                UploadKind::ProfileImage => {
                    "Only JPEG, PNG, and WebP images are allowed for profile pictures"
                }
                UploadKind::Resume => "Only PDF files are allowed for resume",
            };
            return Err(ApiError::Validation(message.to_string()));
        }
    }

    if size > max_size {
        let message = match kind {
            UploadKind::ProfileImage => {
                format!("Profile picture must be less than {}MB", max_size / (1024 * 1024))
            }
            UploadKind::Resume => {
                format!("Resume must be less than {}MB", max_size / (1024 * 1024))
            }
        };
        return Err(ApiError::Validation(message));
    }

    Ok(())
}

/// A client upload that passed MIME and size validation
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Validate a multipart temp file and read it into memory for forwarding
pub async fn read_validated(
    kind: UploadKind,
    file: &actix_multipart::form::tempfile::TempFile,
    max_size: usize,
) -> Result<UploadedFile, ApiError> {
    let content_type = file
        .content_type
        .as_ref()
        .map(|m| m.essence_str().to_string());

    check_upload(kind, content_type.as_deref(), file.size, max_size)?;

    let bytes = tokio::fs::read(file.file.path())
        .await
        .map_err(|e| ApiError::Internal(format!("failed to read upload: {}", e)))?;

    let filename = file.file_name.clone().unwrap_or_else(|| {
        match kind {
            UploadKind::ProfileImage => "image".to_string(),
            UploadKind::Resume => "resume.pdf".to_string(),
        }
    });

    Ok(UploadedFile {
        filename,
        // check_upload already rejected uploads without a content type
        content_type: content_type.unwrap_or_default(),
        bytes,
    })
}

/// External media-hosting collaborator. Takes validated file bytes and
/// returns a durable URL; its storage behavior is out of scope.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError>;
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// MediaStore talking to an HTTP upload endpoint: multipart POST in,
/// JSON `{url}` out
pub struct HttpMediaStore {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpMediaStore {
    pub fn new(upload_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        debug!("Forwarding {} ({} bytes) to media host", filename, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::Media(format!("invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Media(format!("upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::Media(format!(
                "media host responded with status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Media(format!("malformed upload response: {}", e)))?;

        info!("Media host stored {} at {}", filename, body.url);
        Ok(body.url)
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// MediaStore that records nothing and returns a canned URL
    pub struct FixtureMediaStore;

    #[async_trait]
    impl MediaStore for FixtureMediaStore {
        async fn upload(
            &self,
            filename: &str,
            _content_type: &str,
            _bytes: Vec<u8>,
        ) -> Result<String, ApiError> {
            Ok(format!("https://media.test/{}", filename))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MB: usize = 1024 * 1024;

    #[rstest]
    #[case(UploadKind::ProfileImage, "image/jpeg")]
    #[case(UploadKind::ProfileImage, "image/png")]
    #[case(UploadKind::ProfileImage, "image/webp")]
    #[case(UploadKind::Resume, "application/pdf")]
    fn accepts_allowed_types(#[case] kind: UploadKind, #[case] content_type: &str) {
        assert!(check_upload(kind, Some(content_type), 1024, 2 * MB).is_ok());
    }

    #[rstest]
    #[case(UploadKind::ProfileImage, Some("application/pdf"))]
    #[case(UploadKind::ProfileImage, Some("image/gif"))]
    #[case(UploadKind::ProfileImage, None)]
    #[case(UploadKind::Resume, Some("image/png"))]
    #[case(UploadKind::Resume, None)]
    fn rejects_disallowed_types(#[case] kind: UploadKind, #[case] content_type: Option<&str>) {
        let err = check_upload(kind, content_type, 1024, 2 * MB).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn rejects_oversized_file() {
        let err = check_upload(
            UploadKind::Resume,
            Some("application/pdf"),
            5 * MB + 1,
            5 * MB,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn size_exactly_at_limit_is_allowed() {
        assert!(check_upload(UploadKind::ProfileImage, Some("image/png"), 2 * MB, 2 * MB).is_ok());
    }
}

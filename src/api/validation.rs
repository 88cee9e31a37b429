use actix_web::HttpResponse;

use crate::api::error::ErrorBody;

/// Creates a configured JsonConfig so body deserialization and validator
/// failures render the same `{success:false, message}` envelope as every
/// other error in the API
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| {
        let message = match err {
            actix_web_validator::Error::Validate(validation_errors) => {
                // Surface the first field message; one actionable error
                // beats a wall of them
                validation_errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("Invalid value for field: {}", field))
                        })
                    })
                    .next()
                    .unwrap_or_else(|| "Validation failed".to_string())
            }
            actix_web_validator::Error::Deserialize(de_err) => {
                let err_string = de_err.to_string();

                if err_string.contains("EOF while parsing") {
                    "Request body is empty. Expected JSON payload".to_string()
                } else if err_string.contains("unknown variant") {
                    "Invalid value. Check allowed values for this field".to_string()
                } else if err_string.contains("missing field") {
                    "A required field is missing from the request body".to_string()
                } else {
                    "Invalid JSON format".to_string()
                }
            }
            _ => "Validation failed".to_string(),
        };

        actix_web::error::InternalError::from_response(
            "",
            HttpResponse::BadRequest().json(ErrorBody::new(message)),
        )
        .into()
    })
}

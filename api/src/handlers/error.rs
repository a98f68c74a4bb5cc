//! Mapping of domain errors and request problems to HTTP responses

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use uuid::Uuid;
use validator::ValidationErrors;

use rfs_core::errors::DomainError;
use rfs_core::services::verification::RejectReason;
use rfs_shared::{error_codes, ErrorResponse};

/// Request id from `X-Request-Id`, or a fresh one
pub fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && value.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::DispatchFailed { .. } => StatusCode::BAD_GATEWAY,
        DomainError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(error: &DomainError) -> String {
    match error {
        DomainError::Validation { message } => message.clone(),
        DomainError::DispatchFailed { .. } => {
            "Failed to send verification email. Please try again later.".to_string()
        }
        DomainError::StoreUnavailable { .. } => {
            "Verification service is temporarily unavailable. Please try again later.".to_string()
        }
        DomainError::Internal { .. } => "An internal error occurred".to_string(),
    }
}

/// Convert a domain error into an error response
///
/// Provider and store details are logged, never returned to the client.
pub fn domain_error_response(error: &DomainError, request_id: &str) -> HttpResponse {
    let status = status_for(error);
    if status.is_server_error() {
        log::error!("[{}] Request failed: {}", request_id, error);
    } else {
        log::warn!("[{}] Request rejected: {}", request_id, error);
    }

    let body = ErrorResponse::new(error.code(), public_message(error))
        .add_detail("request_id", request_id);
    HttpResponse::build(status).json(body)
}

/// 400 for an identity refused by the domain policy
pub fn rejected_response(reason: RejectReason) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(reason.code(), reason.message()))
}

/// 400 listing the fields that failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field.to_string(), messages);
    }
    HttpResponse::BadRequest().json(body)
}

/// `JsonConfig` error handler producing the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    log::warn!("Malformed JSON body: {}", message);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        format!("Malformed request body: {}", message),
    ));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&DomainError::dispatch("x")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&DomainError::store("x")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&DomainError::Validation {
                message: "x".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Internal {
                message: "x".to_string()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_details_not_exposed() {
        let message = public_message(&DomainError::store("redis://secret@host refused"));
        assert!(!message.contains("secret"));
    }

    #[test]
    fn test_request_id_from_header() {
        let req = TestRequest::default()
            .insert_header(("x-request-id", "abc-123"))
            .to_http_request();
        assert_eq!(request_id(&req), "abc-123");

        let req = TestRequest::default().to_http_request();
        assert_eq!(request_id(&req).len(), 36);
    }
}

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use rfs_core::repositories::VerificationRecordRepository;
use rfs_core::services::verification::{EmailServiceTrait, IssueOutcome};
use rfs_shared::email::mask_email;
use rfs_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::{domain_error_response, rejected_response, request_id, validation_error_response};

/// Handler for POST /api/v1/verification/request-code
///
/// Emails a verification code to a government address. Requesting again
/// replaces any code sent earlier.
///
/// # Request Body
///
/// ```json
/// { "email": "agency@city.gov" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "success",
///     "data": { "accepted": true, "expires_in_minutes": 15 },
///     "timestamp": "2025-08-14T10:00:00Z",
///     "request_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 `INVALID_EMAIL_FORMAT` / `DOMAIN_NOT_ALLOWED` / `VALIDATION_ERROR`
/// - 502 `DISPATCH_FAILED`
/// - 503 `STORE_UNAVAILABLE`
pub async fn request_code<R, E>(
    req: HttpRequest,
    state: web::Data<AppState<R, E>>,
    request: web::Json<RequestCodeRequest>,
) -> HttpResponse
where
    R: VerificationRecordRepository + ?Sized + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let request_id = request_id(&req);

    if let Err(errors) = request.validate() {
        log::warn!(
            "[{}] Validation failed for request_code: {:?}",
            request_id,
            errors.field_errors().keys().collect::<Vec<_>>()
        );
        return validation_error_response(&errors);
    }

    log::info!(
        "[{}] Processing request_code for email: {}",
        request_id,
        mask_email(&request.email)
    );

    let service = &state.verification_service;
    match service.request_code(&request.email).await {
        Ok(IssueOutcome::Accepted) => HttpResponse::Ok().json(
            ApiResponse::success(RequestCodeResponse {
                accepted: true,
                expires_in_minutes: service.config().code_expiration_minutes,
            })
            .with_request_id(request_id),
        ),
        Ok(IssueOutcome::Rejected(reason)) => {
            log::info!(
                "[{}] Email rejected ({}): {}",
                request_id,
                reason.code(),
                mask_email(&request.email)
            );
            rejected_response(reason)
        }
        Err(error) => domain_error_response(&error, &request_id),
    }
}

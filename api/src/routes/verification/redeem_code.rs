use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use rfs_core::repositories::VerificationRecordRepository;
use rfs_core::services::verification::EmailServiceTrait;
use rfs_shared::email::mask_email;
use rfs_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{RedeemCodeRequest, RedeemCodeResponse};
use crate::handlers::{domain_error_response, request_id, validation_error_response};

/// Handler for POST /api/v1/verification/redeem
///
/// Negative outcomes (wrong, expired or exhausted code) are reported in the
/// body with status 200; only infrastructure failures are HTTP errors.
///
/// # Response
///
/// ```json
/// {
///     "status": "success",
///     "data": { "verified": false, "reason": "INVALID_CODE", "remaining_attempts": 2 },
///     "timestamp": "2025-08-14T10:00:00Z"
/// }
/// ```
pub async fn redeem_code<R, E>(
    req: HttpRequest,
    state: web::Data<AppState<R, E>>,
    request: web::Json<RedeemCodeRequest>,
) -> HttpResponse
where
    R: VerificationRecordRepository + ?Sized + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let request_id = request_id(&req);

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .verification_service
        .redeem(&request.email, &request.code)
        .await
    {
        Ok(outcome) => {
            log::info!(
                "[{}] Redeem for {}: {}",
                request_id,
                mask_email(&request.email),
                outcome.reason().unwrap_or("VERIFIED")
            );
            HttpResponse::Ok().json(
                ApiResponse::success(RedeemCodeResponse::from(outcome)).with_request_id(request_id),
            )
        }
        Err(error) => domain_error_response(&error, &request_id),
    }
}

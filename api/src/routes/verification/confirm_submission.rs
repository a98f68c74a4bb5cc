use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use rfs_core::repositories::VerificationRecordRepository;
use rfs_core::services::verification::EmailServiceTrait;
use rfs_shared::email::mask_email;
use rfs_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{ConfirmSubmissionRequest, RedeemCodeResponse};
use crate::handlers::{domain_error_response, request_id, validation_error_response};

/// Handler for POST /api/v1/verification/confirm-submission
///
/// Redeems the code for a project request. When the code verifies, a
/// "Request Received" email is sent to the submitter; a failure to send it
/// does not change the response. The body has the same shape as `/redeem`.
pub async fn confirm_submission<R, E>(
    req: HttpRequest,
    state: web::Data<AppState<R, E>>,
    request: web::Json<ConfirmSubmissionRequest>,
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
        .confirm_submission(&request.email, &request.code, request.title.trim())
        .await
    {
        Ok(outcome) => {
            log::info!(
                "[{}] Submission confirmation for {}: {}",
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

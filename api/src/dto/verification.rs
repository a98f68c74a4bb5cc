use serde::{Deserialize, Serialize};
use validator::Validate;

use rfs_core::services::verification::RedeemOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestCodeRequest {
    /// Submitter's email address, e.g. "agency@city.gov"
    #[validate(length(min = 3, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RedeemCodeRequest {
    #[validate(length(min = 3, max = 254))]
    pub email: String,

    /// Code from the verification email. Not restricted to six digits here;
    /// a malformed code is charged as a wrong guess.
    #[validate(length(max = 32))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmSubmissionRequest {
    #[validate(length(min = 3, max = 254))]
    pub email: String,

    #[validate(length(max = 32))]
    pub code: String,

    /// Title of the project request being submitted
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub accepted: bool,
    pub expires_in_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemCodeResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
}

impl From<RedeemOutcome> for RedeemCodeResponse {
    fn from(outcome: RedeemOutcome) -> Self {
        Self {
            verified: outcome.is_verified(),
            reason: outcome.reason().map(str::to_string),
            remaining_attempts: outcome.remaining_attempts(),
        }
    }
}

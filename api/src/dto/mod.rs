pub mod verification;

pub use verification::{
    ConfirmSubmissionRequest, RedeemCodeRequest, RedeemCodeResponse, RequestCodeRequest,
    RequestCodeResponse,
};

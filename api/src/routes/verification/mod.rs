//! Verification route handlers
//!
//! - Requesting a code for an email address
//! - Redeeming a code
//! - Redeeming a code for a project request submission

pub mod confirm_submission;
pub mod redeem_code;
pub mod request_code;

pub use confirm_submission::confirm_submission;
pub use redeem_code::redeem_code;
pub use request_code::request_code;

//! Verification service module for email-based submitter verification
//!
//! This module provides the confirmation-code workflow:
//! - Identity policy checks (format, allowed domain suffixes, bypass list)
//! - Code generation, storage and email dispatch
//! - Redemption with expiry and attempt limits
//! - Acknowledgement email after a verified submission

mod config;
mod policy;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use policy::DomainPolicy;
pub use service::VerificationService;
pub use traits::EmailServiceTrait;
pub use types::{IssueOutcome, RedeemOutcome, RejectReason};

//! Email Service Module
//!
//! Outbound email implementations of the core `EmailServiceTrait`:
//!
//! - **Resend**: production delivery over the Resend HTTP API
//! - **Mock**: logs and records messages for development and tests

pub mod mock_email;
pub mod resend;
pub mod templates;

pub use mock_email::{MockEmailService, SentEmail};
pub use resend::ResendEmailService;
pub use templates::EmailContent;

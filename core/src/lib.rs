//! # RFS Government Core
//!
//! Core business logic for email verification of project-request submitters.
//! This crate contains the verification record entity, the code issuance and
//! redemption service, the record store protocol, and the error types that the
//! infrastructure and API layers build on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

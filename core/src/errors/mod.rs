//! Domain-specific error types and error handling.
//!
//! Outcomes of a redemption (wrong code, expired, and so on) are not errors;
//! they are reported through `RedeemOutcome`. `DomainError` covers the
//! failures a caller cannot act on by resubmitting.

use rfs_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The email with the code could not be delivered
    #[error("Email dispatch failed: {message}")]
    DispatchFailed { message: String },

    /// The record store is unreachable or returned an error
    #[error("Record store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::DispatchFailed {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => error_codes::VALIDATION_ERROR,
            Self::DispatchFailed { .. } => error_codes::DISPATCH_FAILED,
            Self::StoreUnavailable { .. } => error_codes::STORE_UNAVAILABLE,
            Self::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::store("connection refused");
        assert_eq!(err.to_string(), "Record store unavailable: connection refused");

        let err = DomainError::dispatch("timed out");
        assert_eq!(err.to_string(), "Email dispatch failed: timed out");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::store("x").code(), "STORE_UNAVAILABLE");
        assert_eq!(DomainError::dispatch("x").code(), "DISPATCH_FAILED");
        assert_eq!(
            DomainError::Validation { message: "x".into() }.code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            DomainError::Internal { message: "x".into() }.code(),
            "INTERNAL_ERROR"
        );
    }
}

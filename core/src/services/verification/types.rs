//! Types for verification service results

use rfs_shared::error_codes;

/// Why an identity was refused a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Not a `local@domain` address
    InvalidFormat,
    /// Well formed, but neither an allowed suffix nor on the bypass list
    DomainNotAllowed,
}

impl RejectReason {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidFormat => error_codes::INVALID_EMAIL_FORMAT,
            Self::DomainNotAllowed => error_codes::DOMAIN_NOT_ALLOWED,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidFormat => "Invalid email address format",
            Self::DomainNotAllowed => "Must be a .gov email address",
        }
    }
}

/// Result of requesting a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOutcome {
    /// Code stored and emailed
    Accepted,
    /// Identity failed policy; nothing stored or sent
    Rejected(RejectReason),
}

/// Result of redeeming a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    Verified,
    NotFound,
    Expired,
    TooManyAttempts,
    InvalidCode { remaining_attempts: u32 },
}

impl RedeemOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Wire reason string for negative outcomes
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Verified => None,
            Self::NotFound => Some("NOT_FOUND"),
            Self::Expired => Some("EXPIRED"),
            Self::TooManyAttempts => Some("TOO_MANY_ATTEMPTS"),
            Self::InvalidCode { .. } => Some("INVALID_CODE"),
        }
    }

    pub fn remaining_attempts(&self) -> Option<u32> {
        match self {
            Self::InvalidCode { remaining_attempts } => Some(*remaining_attempts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeem_reasons() {
        assert_eq!(RedeemOutcome::Verified.reason(), None);
        assert_eq!(RedeemOutcome::NotFound.reason(), Some("NOT_FOUND"));
        assert_eq!(RedeemOutcome::Expired.reason(), Some("EXPIRED"));
        assert_eq!(
            RedeemOutcome::TooManyAttempts.reason(),
            Some("TOO_MANY_ATTEMPTS")
        );
        let invalid = RedeemOutcome::InvalidCode {
            remaining_attempts: 2,
        };
        assert_eq!(invalid.reason(), Some("INVALID_CODE"));
        assert_eq!(invalid.remaining_attempts(), Some(2));
        assert!(!invalid.is_verified());
        assert!(RedeemOutcome::Verified.is_verified());
    }

    #[test]
    fn test_reject_codes() {
        assert_eq!(RejectReason::InvalidFormat.code(), "INVALID_EMAIL_FORMAT");
        assert_eq!(RejectReason::DomainNotAllowed.code(), "DOMAIN_NOT_ALLOWED");
        assert_eq!(RejectReason::DomainNotAllowed.message(), "Must be a .gov email address");
    }
}

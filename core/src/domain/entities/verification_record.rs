//! Verification record entity for email-based submitter verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum number of failed redemptions allowed per code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code value (keeps every code at six digits)
pub const CODE_MIN: u32 = 100_000;

/// Largest code value
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Outstanding verification for one identity
///
/// At most one record exists per identity. Issuing a new code replaces the
/// record wholesale; redeeming, expiring or exhausting it deletes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    /// Email address the code was issued for (normalized, used as the key)
    pub identity: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Number of redemption attempts charged against this code
    pub attempts: u32,
}

impl VerificationRecord {
    /// Creates a new record with a fresh random code, issued now
    pub fn new(identity: String) -> Self {
        Self::issued_at(identity, Utc::now())
    }

    /// Creates a new record with a fresh random code and an explicit issue time
    pub fn issued_at(identity: String, created_at: DateTime<Utc>) -> Self {
        Self {
            identity,
            code: Self::generate_code(),
            created_at,
            attempts: 0,
        }
    }

    /// Generates a uniformly random 6-digit code in `CODE_MIN..=CODE_MAX`
    ///
    /// Not a CSPRNG guarantee; the attempt budget and the expiry window are
    /// what bound guessing.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Time elapsed since issuance
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    /// Whether the expiry window has elapsed
    ///
    /// A record is redeemable only while `age < window`.
    pub fn is_expired(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) >= window
    }

    /// Instant at which the code stops being redeemable
    pub fn expires_at(&self, window: Duration) -> DateTime<Utc> {
        self.created_at + window
    }

    /// Whether the attempt budget is used up
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Attempts left before the code is burned
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Compares a candidate against the stored code in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.len() == self.code.len()
            && constant_time_eq(candidate.as_bytes(), self.code.as_bytes())
    }

    /// Copy of this record with one more attempt charged
    pub fn with_attempt_charged(&self) -> Self {
        Self {
            attempts: self.attempts.saturating_add(1),
            ..self.clone()
        }
    }
}

/// Whether a candidate is shaped like an issued code (six ASCII digits)
pub fn is_well_formed_code(candidate: &str) -> bool {
    candidate.len() == CODE_LENGTH && candidate.chars().all(|c| c.is_ascii_digit())
}

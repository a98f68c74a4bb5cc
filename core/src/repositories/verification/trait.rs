//! Record store protocol for outstanding verification codes.

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainResult;

/// Result of a conditional write against the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The stored record matched the expected one and the write was applied
    Applied,
    /// No record is stored for the identity
    Missing,
    /// A different record (new issuance or other attempt) is stored now
    Superseded,
}

impl WriteOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Repository trait for verification record persistence
///
/// Records are keyed by normalized identity and at most one exists per
/// identity. The conditional operations compare the whole stored record
/// (code, issue time and attempt count) against `expected` and only write when
/// they are equal, so a caller acting on a stale read never clobbers a newer
/// record.
///
/// Every method returns `DomainError::StoreUnavailable` when the backing
/// store cannot be reached or holds undecodable data.
#[async_trait]
pub trait VerificationRecordRepository: Send + Sync {
    /// Point lookup by identity
    ///
    /// # Returns
    /// * `Ok(Some(record))` - A record is stored for the identity
    /// * `Ok(None)` - Nothing stored
    async fn find(&self, identity: &str) -> DomainResult<Option<VerificationRecord>>;

    /// Create or replace the record for `record.identity` unconditionally
    async fn upsert(&self, record: &VerificationRecord) -> DomainResult<()>;

    /// Increment `attempts` by one if the stored record still equals `expected`
    async fn increment_attempts_if_unchanged(
        &self,
        expected: &VerificationRecord,
    ) -> DomainResult<WriteOutcome>;

    /// Delete the record if it still equals `expected`
    async fn delete_if_unchanged(&self, expected: &VerificationRecord)
        -> DomainResult<WriteOutcome>;

    /// Delete whatever is stored for the identity
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - Nothing was stored
    async fn delete(&self, identity: &str) -> DomainResult<bool>;
}

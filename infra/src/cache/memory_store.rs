//! Process-local verification record store
//!
//! Used for development and tests. Records live only as long as the process
//! and are not shared between server instances.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use rfs_core::domain::entities::VerificationRecord;
use rfs_core::errors::DomainResult;
use rfs_core::repositories::{VerificationRecordRepository, WriteOutcome};

/// In-memory verification record store
#[derive(Clone, Default)]
pub struct InMemoryVerificationStore {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
}

impl InMemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl VerificationRecordRepository for InMemoryVerificationStore {
    async fn find(&self, identity: &str) -> DomainResult<Option<VerificationRecord>> {
        Ok(self.records.read().await.get(identity).cloned())
    }

    async fn upsert(&self, record: &VerificationRecord) -> DomainResult<()> {
        self.records
            .write()
            .await
            .insert(record.identity.clone(), record.clone());
        Ok(())
    }

    async fn increment_attempts_if_unchanged(
        &self,
        expected: &VerificationRecord,
    ) -> DomainResult<WriteOutcome> {
        let mut records = self.records.write().await;
        let outcome = match records.get_mut(&expected.identity) {
            None => WriteOutcome::Missing,
            Some(current) if current != expected => WriteOutcome::Superseded,
            Some(current) => {
                current.attempts = current.attempts.saturating_add(1);
                WriteOutcome::Applied
            }
        };
        Ok(outcome)
    }

    async fn delete_if_unchanged(
        &self,
        expected: &VerificationRecord,
    ) -> DomainResult<WriteOutcome> {
        let mut records = self.records.write().await;
        let outcome = match records.get(&expected.identity) {
            None => WriteOutcome::Missing,
            Some(current) if current != expected => WriteOutcome::Superseded,
            Some(_) => {
                records.remove(&expected.identity);
                WriteOutcome::Applied
            }
        };
        Ok(outcome)
    }

    async fn delete(&self, identity: &str) -> DomainResult<bool> {
        Ok(self.records.write().await.remove(identity).is_some())
    }
}

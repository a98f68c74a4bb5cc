//! Mock implementation of VerificationRecordRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

use crate::domain::entities::VerificationRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::{VerificationRecordRepository, WriteOutcome};

/// A change made by another caller, applied once just before a conditional write
#[derive(Debug, Clone)]
pub enum Interference {
    /// Another issuance replaced the record
    Replace(VerificationRecord),
    /// Another redemption consumed the record
    Remove,
}

/// Mock record store for testing
///
/// Can be switched into a failing mode to simulate an unreachable store, and
/// can replay a concurrent change right before the next conditional write.
pub struct MockVerificationRecordRepository {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
    fail: AtomicBool,
    upserts: AtomicUsize,
    before_increment: Mutex<Option<Interference>>,
    before_delete: Mutex<Option<Interference>>,
}

impl MockVerificationRecordRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail: AtomicBool::new(false),
            upserts: AtomicUsize::new(0),
            before_increment: Mutex::new(None),
            before_delete: Mutex::new(None),
        }
    }

    /// Apply `change` right before the next `increment_attempts_if_unchanged`
    pub fn interfere_before_increment(&self, change: Interference) {
        if let Ok(mut slot) = self.before_increment.lock() {
            *slot = Some(change);
        }
    }

    /// Apply `change` right before the next `delete_if_unchanged`
    pub fn interfere_before_delete(&self, change: Interference) {
        if let Ok(mut slot) = self.before_delete.lock() {
            *slot = Some(change);
        }
    }

    async fn interfere(&self, slot: &Mutex<Option<Interference>>, identity: &str) {
        let change = slot.lock().ok().and_then(|mut slot| slot.take());
        let mut records = self.records.write().await;
        match change {
            Some(Interference::Replace(record)) => {
                records.insert(record.identity.clone(), record);
            }
            Some(Interference::Remove) => {
                records.remove(identity);
            }
            None => {}
        }
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_should_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Store a record directly, bypassing the failure switch
    pub async fn insert(&self, record: VerificationRecord) {
        self.records
            .write()
            .await
            .insert(record.identity.clone(), record);
    }

    /// Read a record directly, bypassing the failure switch
    pub async fn get(&self, identity: &str) -> Option<VerificationRecord> {
        self.records.read().await.get(identity).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    fn check(&self) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::store("mock store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockVerificationRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRecordRepository for MockVerificationRecordRepository {
    async fn find(&self, identity: &str) -> DomainResult<Option<VerificationRecord>> {
        self.check()?;
        Ok(self.records.read().await.get(identity).cloned())
    }

    async fn upsert(&self, record: &VerificationRecord) -> DomainResult<()> {
        self.check()?;
        self.upserts.fetch_add(1, Ordering::SeqCst);
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
        self.check()?;
        self.interfere(&self.before_increment, &expected.identity).await;
        let mut records = self.records.write().await;
        match records.get_mut(&expected.identity) {
            None => Ok(WriteOutcome::Missing),
            Some(current) if current != expected => Ok(WriteOutcome::Superseded),
            Some(current) => {
                current.attempts += 1;
                Ok(WriteOutcome::Applied)
            }
        }
    }

    async fn delete_if_unchanged(
        &self,
        expected: &VerificationRecord,
    ) -> DomainResult<WriteOutcome> {
        self.check()?;
        self.interfere(&self.before_delete, &expected.identity).await;
        let mut records = self.records.write().await;
        match records.get(&expected.identity) {
            None => Ok(WriteOutcome::Missing),
            Some(current) if current != expected => Ok(WriteOutcome::Superseded),
            Some(_) => {
                records.remove(&expected.identity);
                Ok(WriteOutcome::Applied)
            }
        }
    }

    async fn delete(&self, identity: &str) -> DomainResult<bool> {
        self.check()?;
        Ok(self.records.write().await.remove(identity).is_some())
    }
}

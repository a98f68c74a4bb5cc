//! Redis-backed verification record store
//!
//! Records are stored as JSON under `{prefix}:{identity}`, for example
//! `verification-codes:agency@city.gov`. The key TTL is the expiry window plus
//! a grace period, so a late redemption still finds the record and is reported
//! as expired; the TTL only reclaims codes nobody comes back for.
//!
//! Conditional writes use optimistic transactions: `WATCH` the key, read and
//! compare the stored record, then `MULTI`/`EXEC` the write. If another client
//! touched the key in between, `EXEC` aborts and the comparison is repeated.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, warn};

use rfs_core::domain::entities::VerificationRecord;
use rfs_core::errors::DomainResult;
use rfs_core::repositories::{VerificationRecordRepository, WriteOutcome};
use rfs_shared::email::mask_email;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Write applied inside an optimistic transaction
#[derive(Debug, Clone, Copy)]
enum ConditionalWrite {
    IncrementAttempts,
    Delete,
}

/// Verification record store on Redis
#[derive(Clone)]
pub struct RedisVerificationStore {
    redis_client: RedisClient,
    key_prefix: String,
    ttl_seconds: u64,
}

impl RedisVerificationStore {
    /// Create a new store
    ///
    /// # Arguments
    /// * `redis_client` - Connected Redis client
    /// * `key_prefix` - Keyspace prefix, `verification-codes` by default
    /// * `ttl_seconds` - Key TTL, longer than the code expiry window
    pub fn new(redis_client: RedisClient, key_prefix: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            redis_client,
            key_prefix: key_prefix.into(),
            ttl_seconds: ttl_seconds.max(1),
        }
    }

    /// Redis key for an identity
    pub fn format_key(&self, identity: &str) -> String {
        format!("{}:{}", self.key_prefix, identity)
    }

    fn decode(raw: &str) -> Result<VerificationRecord, InfrastructureError> {
        Ok(serde_json::from_str(raw)?)
    }

    async fn conditional_write(
        &self,
        expected: &VerificationRecord,
        write: ConditionalWrite,
    ) -> Result<WriteOutcome, InfrastructureError> {
        let key = self.format_key(&expected.identity);
        let mut conn = self.redis_client.dedicated_connection().await?;
        let max_rounds = self.redis_client.max_retries().max(1);

        for round in 1..=max_rounds {
            redis::cmd("WATCH")
                .arg(&key)
                .query_async::<_, ()>(&mut conn)
                .await?;

            let current = match conn.get::<_, Option<String>>(&key).await? {
                Some(raw) => Self::decode(&raw)?,
                None => {
                    redis::cmd("UNWATCH").query_async::<_, ()>(&mut conn).await?;
                    return Ok(WriteOutcome::Missing);
                }
            };

            if current != *expected {
                redis::cmd("UNWATCH").query_async::<_, ()>(&mut conn).await?;
                return Ok(WriteOutcome::Superseded);
            }

            let mut pipe = redis::pipe();
            pipe.atomic();
            match write {
                ConditionalWrite::IncrementAttempts => {
                    let next = serde_json::to_string(&expected.with_attempt_charged())?;
                    pipe.cmd("SET").arg(&key).arg(next).arg("KEEPTTL").ignore();
                }
                ConditionalWrite::Delete => {
                    pipe.del(&key).ignore();
                }
            }

            // EXEC replies nil when a watched key changed
            let committed: Option<()> = pipe.query_async(&mut conn).await?;
            if committed.is_some() {
                return Ok(WriteOutcome::Applied);
            }

            debug!(
                identity = %mask_email(&expected.identity),
                round,
                "Verification record changed during transaction, re-reading"
            );
        }

        warn!(
            identity = %mask_email(&expected.identity),
            event = "store_contention",
            "Gave up conditional write after repeated contention"
        );
        Ok(WriteOutcome::Superseded)
    }
}

#[async_trait]
impl VerificationRecordRepository for RedisVerificationStore {
    async fn find(&self, identity: &str) -> DomainResult<Option<VerificationRecord>> {
        let key = self.format_key(identity);
        match self.redis_client.get(&key).await? {
            Some(raw) => Ok(Some(Self::decode(&raw)?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, record: &VerificationRecord) -> DomainResult<()> {
        let key = self.format_key(&record.identity);
        let raw = serde_json::to_string(record).map_err(InfrastructureError::from)?;
        self.redis_client
            .set_with_expiry(&key, &raw, self.ttl_seconds)
            .await?;
        Ok(())
    }

    async fn increment_attempts_if_unchanged(
        &self,
        expected: &VerificationRecord,
    ) -> DomainResult<WriteOutcome> {
        Ok(self
            .conditional_write(expected, ConditionalWrite::IncrementAttempts)
            .await?)
    }

    async fn delete_if_unchanged(
        &self,
        expected: &VerificationRecord,
    ) -> DomainResult<WriteOutcome> {
        Ok(self
            .conditional_write(expected, ConditionalWrite::Delete)
            .await?)
    }

    async fn delete(&self, identity: &str) -> DomainResult<bool> {
        let key = self.format_key(identity);
        Ok(self.redis_client.delete(&key).await?)
    }
}

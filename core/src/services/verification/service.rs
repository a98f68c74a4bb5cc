//! Main verification service implementation

use chrono::Utc;
use std::sync::Arc;
use tokio::time::timeout;

use rfs_shared::email::{mask_email, normalize_email};

use crate::domain::entities::VerificationRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{VerificationRecordRepository, WriteOutcome};

use super::config::VerificationServiceConfig;
use super::policy::DomainPolicy;
use super::traits::EmailServiceTrait;
use super::types::{IssueOutcome, RedeemOutcome};

/// Verification service issuing and redeeming email confirmation codes
///
/// The service holds no per-identity state; everything lives in the record
/// store. Both trait parameters may be unsized so the API layer can pick the
/// store and email backends at runtime behind `Arc<dyn ...>`.
pub struct VerificationService<R, E>
where
    R: VerificationRecordRepository + ?Sized,
    E: EmailServiceTrait + ?Sized,
{
    /// Record store for outstanding codes
    repository: Arc<R>,
    /// Email service for sending messages
    email_service: Arc<E>,
    /// Service configuration
    config: VerificationServiceConfig,
    policy: DomainPolicy,
}

impl<R, E> VerificationService<R, E>
where
    R: VerificationRecordRepository + ?Sized,
    E: EmailServiceTrait + ?Sized,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `repository` - Record store implementation
    /// * `email_service` - Email service implementation
    /// * `config` - Service configuration
    pub fn new(repository: Arc<R>, email_service: Arc<E>, config: VerificationServiceConfig) -> Self {
        let policy = config.policy();
        Self {
            repository,
            email_service,
            config,
            policy,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a fresh code for an identity and email it
    ///
    /// This method:
    /// 1. Normalizes the identity and applies the domain policy
    /// 2. Generates a new code and replaces any stored record
    /// 3. Sends the code by email within the dispatch timeout
    /// 4. Rolls the record back if the email could not be sent
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome::Accepted)` - Code stored and sent
    /// * `Ok(IssueOutcome::Rejected(_))` - Identity refused; nothing stored or sent
    /// * `Err(DomainError::StoreUnavailable)` - Record store failed
    /// * `Err(DomainError::DispatchFailed)` - Email failed or timed out
    pub async fn request_code(&self, identity: &str) -> DomainResult<IssueOutcome> {
        let identity = normalize_email(identity);
        let masked = mask_email(&identity);

        if let Err(reason) = self.policy.check(&identity) {
            tracing::info!(
                identity = %masked,
                reason = reason.code(),
                allowed_suffixes = ?self.policy.suffixes(),
                event = "code_request_rejected",
                "Verification code request rejected by identity policy"
            );
            return Ok(IssueOutcome::Rejected(reason));
        }

        let record = VerificationRecord::new(identity.clone());

        self.repository.upsert(&record).await.map_err(|e| {
            tracing::error!(
                identity = %masked,
                error = %e,
                event = "code_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        let dispatch = timeout(
            self.config.dispatch_timeout,
            self.email_service.send_verification_code(
                &identity,
                &record.code,
                self.config.code_expiration_minutes,
            ),
        )
        .await;

        let failure = match dispatch {
            Ok(Ok(message_id)) => {
                tracing::info!(
                    identity = %masked,
                    message_id = %message_id,
                    event = "code_issued",
                    "Verification code issued and sent"
                );
                return Ok(IssueOutcome::Accepted);
            }
            Ok(Err(DomainError::DispatchFailed { message })) => message,
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "email provider did not respond within {}s",
                self.config.dispatch_timeout.as_secs()
            ),
        };

        tracing::error!(
            identity = %masked,
            error = %failure,
            event = "code_dispatch_failed",
            "Failed to send verification code, rolling back"
        );

        // Only remove the record this call wrote; a concurrent issuance wins
        if let Err(e) = self.repository.delete_if_unchanged(&record).await {
            tracing::warn!(
                identity = %masked,
                error = %e,
                event = "code_rollback_failed",
                "Failed to roll back undelivered verification code"
            );
        }

        Err(DomainError::dispatch(failure))
    }

    /// Redeem a candidate code for an identity
    ///
    /// The attempt is charged in the store before the comparison, so
    /// concurrent guesses can never get more than `max_attempts` comparisons
    /// against one issued code. A successful match deletes the record.
    ///
    /// # Returns
    ///
    /// * `Ok(RedeemOutcome)` - Outcome of the attempt, positive or negative
    /// * `Err(DomainError::StoreUnavailable)` - Record store failed
    pub async fn redeem(&self, identity: &str, candidate: &str) -> DomainResult<RedeemOutcome> {
        let identity = normalize_email(identity);
        let masked = mask_email(&identity);

        let record = match self.repository.find(&identity).await? {
            Some(record) => record,
            None => {
                tracing::info!(
                    identity = %masked,
                    event = "code_not_found",
                    "No outstanding verification code"
                );
                return Ok(RedeemOutcome::NotFound);
            }
        };

        let now = Utc::now();
        if record.is_expired(now, self.config.expiry_window()) {
            self.discard(&record).await?;
            tracing::info!(
                identity = %masked,
                expired_at = %record.expires_at(self.config.expiry_window()),
                event = "code_expired",
                "Verification code expired"
            );
            return Ok(RedeemOutcome::Expired);
        }

        if record.is_exhausted(self.config.max_attempts) {
            self.discard(&record).await?;
            tracing::warn!(
                identity = %masked,
                attempts = record.attempts,
                event = "max_attempts_exceeded",
                "Verification code attempt budget exhausted"
            );
            return Ok(RedeemOutcome::TooManyAttempts);
        }

        let charged = record.with_attempt_charged();
        let remaining_attempts = charged.remaining_attempts(self.config.max_attempts);

        match self.repository.increment_attempts_if_unchanged(&record).await? {
            WriteOutcome::Applied => {}
            WriteOutcome::Missing => return Ok(RedeemOutcome::NotFound),
            WriteOutcome::Superseded => {
                tracing::info!(
                    identity = %masked,
                    event = "code_superseded",
                    "Verification code changed during redemption"
                );
                return Ok(RedeemOutcome::InvalidCode { remaining_attempts });
            }
        }

        if !record.matches(candidate) {
            tracing::info!(
                identity = %masked,
                attempts = charged.attempts,
                remaining_attempts,
                event = "code_mismatch",
                "Invalid verification code"
            );
            return Ok(RedeemOutcome::InvalidCode { remaining_attempts });
        }

        match self.repository.delete_if_unchanged(&charged).await? {
            WriteOutcome::Applied => {
                tracing::info!(
                    identity = %masked,
                    event = "code_verified",
                    "Verification code redeemed"
                );
                Ok(RedeemOutcome::Verified)
            }
            WriteOutcome::Missing => Ok(RedeemOutcome::NotFound),
            WriteOutcome::Superseded => {
                tracing::info!(
                    identity = %masked,
                    event = "code_superseded",
                    "Verification code changed during redemption"
                );
                Ok(RedeemOutcome::InvalidCode { remaining_attempts })
            }
        }
    }

    /// Redeem a code for a project request and acknowledge it by email
    ///
    /// The acknowledgement is best effort: a failed or slow send is logged and
    /// does not change the returned outcome. A blank title is refused before
    /// the code is touched, so it costs no attempt.
    pub async fn confirm_submission(
        &self,
        identity: &str,
        candidate: &str,
        title: &str,
    ) -> DomainResult<RedeemOutcome> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation {
                message: "Request title must not be blank".to_string(),
            });
        }

        let outcome = self.redeem(identity, candidate).await?;
        if !outcome.is_verified() {
            return Ok(outcome);
        }

        let identity = normalize_email(identity);
        let masked = mask_email(&identity);
        let sent = timeout(
            self.config.dispatch_timeout,
            self.email_service.send_request_received(&identity, title),
        )
        .await;

        match sent {
            Ok(Ok(message_id)) => tracing::info!(
                identity = %masked,
                message_id = %message_id,
                event = "request_acknowledged",
                "Request-received email sent"
            ),
            Ok(Err(e)) => tracing::warn!(
                identity = %masked,
                error = %e,
                event = "request_ack_failed",
                "Failed to send request-received email"
            ),
            Err(_) => tracing::warn!(
                identity = %masked,
                event = "request_ack_failed",
                "Request-received email timed out"
            ),
        }

        Ok(outcome)
    }

    /// Remove a dead record unless it has already been replaced
    async fn discard(&self, record: &VerificationRecord) -> DomainResult<()> {
        let outcome = self.repository.delete_if_unchanged(record).await?;
        if outcome == WriteOutcome::Superseded {
            tracing::debug!(
                identity = %mask_email(&record.identity),
                "Kept newer verification record"
            );
        }
        Ok(())
    }
}

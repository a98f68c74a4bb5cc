//! Mock Email Service Implementation
//!
//! A mock implementation of the email service for development and testing.
//! Messages are logged instead of sent, and kept in memory so tests can read
//! back the code that would have been delivered.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use rfs_core::errors::DomainResult;
use rfs_core::services::verification::EmailServiceTrait;
use rfs_shared::email::mask_email;

use crate::email::templates::{self, EmailContent};
use crate::InfrastructureError;

/// A message captured by the mock service
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub id: String,
    pub to: String,
    pub content: EmailContent,
    /// Verification code, for code messages
    pub code: Option<String>,
}

/// Mock email service for development and testing
///
/// This implementation:
/// - Logs messages instead of sending them
/// - Records every message for inspection
/// - Can simulate provider failures
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// All messages sent so far
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Most recent verification code sent to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|email| email.to == to && email.code.is_some())
            .and_then(|email| email.code)
    }

    /// Number of messages sent so far
    pub fn message_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or_default()
    }

    fn record(
        &self,
        to: &str,
        content: EmailContent,
        code: Option<String>,
    ) -> Result<String, InfrastructureError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!("Mock email service simulating failure for {}", mask_email(to));
            return Err(InfrastructureError::Email(
                "simulated provider failure".to_string(),
            ));
        }

        let id = format!("mock-{}", Uuid::new_v4());
        info!(
            "[MOCK EMAIL] to {}: {} (id: {})",
            mask_email(to),
            content.subject,
            id
        );
        debug!("[MOCK EMAIL] body: {}", content.text);

        let mut sent = self
            .sent
            .lock()
            .map_err(|_| InfrastructureError::Email("mock outbox poisoned".to_string()))?;
        sent.push(SentEmail {
            id: id.clone(),
            to: to.to_string(),
            content,
            code,
        });
        Ok(id)
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> DomainResult<String> {
        let content = templates::verification_code(code, expiry_minutes);
        Ok(self.record(to, content, Some(code.to_string()))?)
    }

    async fn send_request_received(&self, to: &str, title: &str) -> DomainResult<String> {
        let content = templates::request_received(title);
        Ok(self.record(to, content, None)?)
    }
}

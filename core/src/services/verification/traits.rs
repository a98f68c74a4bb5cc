//! Trait for the outbound email collaborator

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Trait for email service integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code to `to`
    ///
    /// Returns the provider's message id.
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> DomainResult<String>;

    /// Acknowledge a verified project request submission
    async fn send_request_received(&self, to: &str, title: &str) -> DomainResult<String>;
}

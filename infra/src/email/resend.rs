//! Resend Email Service Implementation
//!
//! Sends transactional email through the Resend HTTP API
//! (`POST {api_base_url}/emails` with a bearer API key).
//!
//! ## Features
//!
//! - Automatic retry with exponential backoff on 429 and 5xx responses
//! - No retry on other client errors (bad key, invalid recipient)
//! - Recipient masking in logs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use rfs_core::errors::DomainResult;
use rfs_core::services::verification::EmailServiceTrait;
use rfs_shared::email::mask_email;
use rfs_shared::EmailConfig;

use crate::email::templates::{self, EmailContent};
use crate::InfrastructureError;

/// Request body for the Resend `emails` endpoint
#[derive(Debug, Serialize)]
pub(crate) struct SendEmailRequest<'a> {
    pub from: &'a str,
    pub to: Vec<&'a str>,
    pub subject: &'a str,
    pub html: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Resend email service implementation
pub struct ResendEmailService {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    from: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl ResendEmailService {
    /// Create a new Resend email service
    ///
    /// Fails with `InfrastructureError::Config` when no API key is configured.
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("email.api_key not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let endpoint = format!("{}/emails", config.api_base_url.trim_end_matches('/'));
        info!("Resend email service initialized with endpoint: {}", endpoint);

        Ok(Self {
            client,
            api_key,
            endpoint,
            from: config.from_header(),
            max_retries: config.max_retries.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Send one message, retrying transient failures
    async fn send(&self, to: &str, content: &EmailContent) -> Result<String, InfrastructureError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: vec![to],
            subject: &content.subject,
            html: &content.html,
            text: &content.text,
        };

        let mut attempts = 0;
        let mut delay = self.retry_delay;

        loop {
            attempts += 1;
            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.max_retries,
                mask_email(to)
            );

            let result = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await;

            let retry_reason = match result {
                Ok(response) if response.status().is_success() => {
                    let parsed: SendEmailResponse = response.json().await?;
                    info!(
                        "Email sent successfully to {} with id: {}",
                        mask_email(to),
                        parsed.id
                    );
                    return Ok(parsed.id);
                }
                Ok(response) => {
                    let status = response.status();
                    let detail = response.text().await.unwrap_or_default();
                    if !is_retryable_status(status) {
                        error!("Email provider rejected request ({}): {}", status, detail);
                        return Err(InfrastructureError::Email(format!(
                            "provider rejected request ({}): {}",
                            status, detail
                        )));
                    }
                    format!("provider returned {}", status)
                }
                Err(e) if e.is_timeout() || e.is_connect() => e.to_string(),
                Err(e) => return Err(InfrastructureError::Http(e)),
            };

            if attempts >= self.max_retries {
                error!(
                    "Failed to send email after {} attempts: {}",
                    attempts, retry_reason
                );
                return Err(InfrastructureError::Email(format!(
                    "failed after {} attempts: {}",
                    attempts, retry_reason
                )));
            }

            warn!(
                "Email send failed (attempt {}/{}): {}. Retrying in {:?}",
                attempts, self.max_retries, retry_reason, delay
            );
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

/// Rate limiting and server-side failures are worth another try
pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl EmailServiceTrait for ResendEmailService {
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> DomainResult<String> {
        let content = templates::verification_code(code, expiry_minutes);
        Ok(self.send(to, &content).await?)
    }

    async fn send_request_received(&self, to: &str, title: &str) -> DomainResult<String> {
        let content = templates::request_received(title);
        Ok(self.send(to, &content).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> EmailConfig {
        EmailConfig {
            api_key: Some("re_test_key".to_string()),
            api_base_url: "https://api.resend.com/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_api_key() {
        let result = ResendEmailService::new(&EmailConfig::default());
        assert!(matches!(result, Err(InfrastructureError::Config(_))));

        let blank = EmailConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(ResendEmailService::new(&blank).is_err());
    }

    #[test]
    fn test_endpoint_and_sender() {
        let service = ResendEmailService::new(&config_with_key()).unwrap();
        assert_eq!(service.endpoint, "https://api.resend.com/emails");
        assert_eq!(
            service.from,
            "RFS Government <rfsgovernment@rfsgovernment.com>"
        );
        assert_eq!(service.max_retries, 3);
    }

    #[test]
    fn test_request_body_shape() {
        let content = templates::verification_code("123456", 15);
        let body = SendEmailRequest {
            from: "RFS Government <rfsgovernment@rfsgovernment.com>",
            to: vec!["agency@city.gov"],
            subject: &content.subject,
            html: &content.html,
            text: &content.text,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["to"], serde_json::json!(["agency@city.gov"]));
        assert_eq!(json["subject"], "Your Verification Code");
        assert!(json["html"].as_str().unwrap().contains("123456"));
    }

    #[test]
    fn test_retryable_status() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable_status(StatusCode::UNPROCESSABLE_ENTITY));
    }
}

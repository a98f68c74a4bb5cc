//! Mock implementations for testing verification service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::{DomainError, DomainResult};
use crate::services::verification::traits::EmailServiceTrait;

// Mock email service for testing
pub struct MockEmailService {
    pub sent_codes: Arc<Mutex<HashMap<String, String>>>,
    pub acknowledgements: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: bool,
    pub delay: Option<Duration>,
}

impl MockEmailService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_codes: Arc::new(Mutex::new(HashMap::new())),
            acknowledgements: Arc::new(Mutex::new(Vec::new())),
            should_fail,
            delay: None,
        }
    }

    /// A service that takes `delay` before every send
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(false)
        }
    }

    pub fn get_sent_code(&self, to: &str) -> Option<String> {
        self.sent_codes.lock().unwrap().get(to).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_codes.lock().unwrap().len()
    }

    pub fn acknowledgements(&self) -> Vec<(String, String)> {
        self.acknowledgements.lock().unwrap().clone()
    }

    async fn simulate(&self) -> DomainResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err(DomainError::dispatch("Email service error"));
        }
        Ok(())
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        _expiry_minutes: i64,
    ) -> DomainResult<String> {
        self.simulate().await?;
        self.sent_codes
            .lock()
            .unwrap()
            .insert(to.to_string(), code.to_string());
        Ok(format!("mock-msg-{}", code))
    }

    async fn send_request_received(&self, to: &str, title: &str) -> DomainResult<String> {
        self.simulate().await?;
        self.acknowledgements
            .lock()
            .unwrap()
            .push((to.to_string(), title.to_string()));
        Ok("mock-ack".to_string())
    }
}

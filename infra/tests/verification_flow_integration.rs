//! End-to-end verification flow over the infrastructure implementations
//!
//! The in-memory tests always run. The Redis tests require a running Redis
//! instance. Run with: cargo test -p rfs_infra --test verification_flow_integration -- --ignored

use std::sync::Arc;

use chrono::{Duration, Utc};

use rfs_core::domain::entities::VerificationRecord;
use rfs_core::repositories::VerificationRecordRepository;
use rfs_core::services::verification::{
    IssueOutcome, RedeemOutcome, RejectReason, VerificationService, VerificationServiceConfig,
};
use rfs_infra::cache::{InMemoryVerificationStore, RedisClient, RedisVerificationStore};
use rfs_infra::email::MockEmailService;
use rfs_infra::factory::create_record_store;
use rfs_shared::CacheConfig;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn test_memory_store_full_flow() {
    init_tracing();
    let store = Arc::new(InMemoryVerificationStore::new());
    let email = Arc::new(MockEmailService::new());
    let service = VerificationService::new(
        store.clone(),
        email.clone(),
        VerificationServiceConfig::default(),
    );

    let outcome = service.request_code("agency@city.gov").await.unwrap();
    assert_eq!(outcome, IssueOutcome::Accepted);
    assert_eq!(store.find("agency@city.gov").await.unwrap().unwrap().attempts, 0);

    let code = email.last_code_for("agency@city.gov").unwrap();
    let wrong = if code == "999999" { "100000" } else { "999999" };

    let outcome = service.redeem("agency@city.gov", wrong).await.unwrap();
    assert_eq!(
        outcome,
        RedeemOutcome::InvalidCode {
            remaining_attempts: 2
        }
    );
    assert_eq!(store.find("agency@city.gov").await.unwrap().unwrap().attempts, 1);

    let outcome = service
        .confirm_submission("agency@city.gov", &code, "Storm Drain Replacement")
        .await
        .unwrap();
    assert_eq!(outcome, RedeemOutcome::Verified);
    assert_eq!(store.len().await, 0);

    let sent = email.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].content.subject, "Request Received");

    let outcome = service.redeem("agency@city.gov", &code).await.unwrap();
    assert_eq!(outcome, RedeemOutcome::NotFound);
}

#[tokio::test]
async fn test_dispatch_failure_leaves_no_record() {
    init_tracing();
    let store = Arc::new(InMemoryVerificationStore::new());
    let email = Arc::new(MockEmailService::new());
    email.set_simulate_failure(true);
    let service = VerificationService::new(
        store.clone(),
        email.clone(),
        VerificationServiceConfig::default(),
    );

    let result = service.request_code("agency@city.gov").await;
    assert!(result.is_err());
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_rejected_identity_sends_nothing() {
    let store = Arc::new(InMemoryVerificationStore::new());
    let email = Arc::new(MockEmailService::new());
    let service = VerificationService::new(
        store.clone(),
        email.clone(),
        VerificationServiceConfig::default(),
    );

    let outcome = service.request_code("someone@example.com").await.unwrap();
    assert_eq!(outcome, IssueOutcome::Rejected(RejectReason::DomainNotAllowed));
    assert_eq!(store.len().await, 0);
    assert_eq!(email.message_count(), 0);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_store_full_flow() {
    init_tracing();
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let client = RedisClient::new(&CacheConfig::new(url)).await.unwrap();
    let store = Arc::new(RedisVerificationStore::new(client, "rfs-it-verification-codes", 900));
    let email = Arc::new(MockEmailService::new());
    let service = VerificationService::new(
        store.clone(),
        email.clone(),
        VerificationServiceConfig::default(),
    );

    let identity = format!("agency-{}@city.gov", uuid::Uuid::new_v4().simple());
    service.request_code(&identity).await.unwrap();
    let code = email.last_code_for(&identity).unwrap();

    let outcome = service.redeem(&identity, &code).await.unwrap();
    assert_eq!(outcome, RedeemOutcome::Verified);
    assert!(store.find(&identity).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_concurrent_guesses_respect_budget() {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let client = RedisClient::new(&CacheConfig::new(url)).await.unwrap();
    let store = Arc::new(RedisVerificationStore::new(client, "rfs-it-verification-codes", 900));
    let email = Arc::new(MockEmailService::new());
    let service = Arc::new(VerificationService::new(
        store.clone(),
        email.clone(),
        VerificationServiceConfig::default(),
    ));

    let identity = format!("agency-{}@city.gov", uuid::Uuid::new_v4().simple());
    service.request_code(&identity).await.unwrap();
    let code = email.last_code_for(&identity).unwrap();
    let wrong = if code == "999999" { "100000" } else { "999999" };

    let mut handles = Vec::new();
    for _ in 0..10 {
        let service = service.clone();
        let identity = identity.clone();
        handles.push(tokio::spawn(async move {
            service.redeem(&identity, wrong).await.unwrap()
        }));
    }
    for handle in handles {
        assert!(!handle.await.unwrap().is_verified());
    }

    if let Some(record) = store.find(&identity).await.unwrap() {
        assert!(record.attempts <= 3);
    }
    store.delete(&identity).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_late_redemption_reports_expired() {
    init_tracing();
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let cache = CacheConfig::new(url.clone()).with_key_prefix("rfs-it-verification-codes");
    let service_config = VerificationServiceConfig::default();
    let window_secs = service_config.expiry_window().num_seconds() as u64;

    let store = create_record_store(&cache, cache.record_ttl_secs(window_secs))
        .await
        .unwrap();
    let email = Arc::new(MockEmailService::new());
    let service = VerificationService::new(store.clone(), email, service_config);

    // Issued one second after the window would have closed
    let identity = format!("agency-{}@city.gov", uuid::Uuid::new_v4().simple());
    let issued_at = Utc::now() - Duration::seconds(window_secs as i64 + 1);
    let record = VerificationRecord::issued_at(identity.clone(), issued_at);
    store.upsert(&record).await.unwrap();

    let key = format!("{}:{}", cache.key_prefix, identity);
    let mut conn = redis::Client::open(url.as_str())
        .unwrap()
        .get_multiplexed_async_connection()
        .await
        .unwrap();
    let ttl: i64 = redis::cmd("TTL").arg(&key).query_async(&mut conn).await.unwrap();
    assert!(ttl > window_secs as i64);

    let outcome = service.redeem(&identity, &record.code).await.unwrap();
    assert_eq!(outcome, RedeemOutcome::Expired);
    assert!(store.find(&identity).await.unwrap().is_none());
}

//! Cache module for verification record storage
//!
//! This module provides the Redis client with retry logic, the Redis-backed
//! verification record store and a process-local store for development.

pub mod memory_store;
pub mod redis_client;
pub mod verification_store;


pub use memory_store::InMemoryVerificationStore;
pub use redis_client::RedisClient;
pub use verification_store::RedisVerificationStore;

// Re-export commonly used types
pub use rfs_shared::config::CacheConfig;

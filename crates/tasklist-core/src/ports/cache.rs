use async_trait::async_trait;
use std::time::Duration;

/// Cache trait - abstraction over TTL key-value backends (Redis, in-memory).
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value. Backend failures read as a miss.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a value with optional TTL, replacing any previous value and TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Delete a key. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

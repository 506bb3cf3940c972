//! # Tasklist Infrastructure
//!
//! Concrete implementations of the ports defined in `tasklist-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store and cache only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `redis` - Redis cache backend

pub mod cache;
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::{DatabaseConfig, InMemoryStore, StoreStats};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresTodoItemRepository, PostgresTodoListRepository, PostgresUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};

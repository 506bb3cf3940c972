//! Relational store: SeaORM-backed PostgreSQL repositories and an in-memory
//! fallback with the same constraints.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use connections::DatabaseConfig;
pub use memory::{InMemoryStore, StoreStats};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_base::PostgresRepository;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresTodoItemRepository, PostgresTodoListRepository, PostgresUserRepository,
};

//! # Tasklist Core
//!
//! The domain layer of the task-list backend.
//! Domain types, ports and the services that drive them. No infrastructure
//! dependencies: storage, caching and token signing are reached through the
//! traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};

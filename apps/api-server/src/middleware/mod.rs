//! Middleware modules: bearer authentication and error mapping.

pub mod auth;
pub mod error;

//! # Tasklist Shared
//!
//! Request and response bodies of the HTTP API, usable by clients without
//! pulling in the server's dependencies.

pub mod dto;
pub mod response;

pub use response::{DataResponse, ErrorResponse, IdResponse, StatusResponse};

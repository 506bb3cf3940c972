//! Liveness endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `postgres` or `memory`.
    pub store: &'static str,
    /// `redis` or `memory`.
    pub cache: &'static str,
    pub timestamp: String,
}

/// GET /api/health
///
/// Reports which store and cache adapters are serving requests after the
/// startup fallbacks.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.backends.store,
        cache: state.backends.cache,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

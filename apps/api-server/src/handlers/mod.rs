//! HTTP handlers and route configuration.

mod auth;
mod health;
mod items;
mod lists;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        // Public routes
        .service(
            web::scope("/auth")
                .route("/sign-up", web::post().to(auth::sign_up))
                .route("/sign-in", web::post().to(auth::sign_in)),
        )
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                // Bearer-protected routes
                .service(
                    web::scope("/lists")
                        .route("", web::post().to(lists::create))
                        .route("", web::get().to(lists::get_all))
                        .route("/{id}", web::get().to(lists::get_by_id))
                        .route("/{id}", web::put().to(lists::update))
                        .route("/{id}", web::delete().to(lists::delete))
                        .route("/{id}/items", web::post().to(items::create))
                        .route("/{id}/items", web::get().to(items::get_all)),
                )
                .service(
                    web::scope("/items")
                        .route("/{id}", web::get().to(items::get_by_id))
                        .route("/{id}", web::put().to(items::update))
                        .route("/{id}", web::delete().to(items::delete)),
                ),
        );
}

/// Malformed bodies are a 400 problem document, not actix's plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

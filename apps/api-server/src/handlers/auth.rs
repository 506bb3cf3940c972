//! Authentication handlers.

use actix_web::{HttpResponse, web};

use tasklist_core::domain::SignUpInput;
use tasklist_shared::IdResponse;
use tasklist_shared::dto::{AuthResponse, SignInRequest, SignUpRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /auth/sign-up
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let id = state
        .auth
        .create_user(SignUpInput {
            name: req.name,
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(IdResponse { id }))
}

/// POST /auth/sign-in
pub async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<SignInRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let token = state.auth.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse::bearer(
        token,
        state.auth.token_ttl_seconds(),
    )))
}

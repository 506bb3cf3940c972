//! List handlers. Every route requires a bearer token.

use actix_web::{HttpResponse, web};

use tasklist_core::domain::{ListId, NewTodoList, UpdateListInput};
use tasklist_shared::dto::{CreateListRequest, UpdateListRequest};
use tasklist_shared::{DataResponse, IdResponse, StatusResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/lists
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateListRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let id = state
        .lists
        .create(identity.user_id, NewTodoList::new(req.title, req.description))
        .await?;

    Ok(HttpResponse::Created().json(IdResponse { id }))
}

/// GET /api/lists
pub async fn get_all(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let lists = state.lists.get_all(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(lists)))
}

/// GET /api/lists/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ListId>,
) -> AppResult<HttpResponse> {
    let list = state
        .lists
        .get_by_id(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(list))
}

/// PUT /api/lists/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ListId>,
    body: web::Json<UpdateListRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    state
        .lists
        .update(
            identity.user_id,
            path.into_inner(),
            UpdateListInput {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// DELETE /api/lists/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ListId>,
) -> AppResult<HttpResponse> {
    state
        .lists
        .delete(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

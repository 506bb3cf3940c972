//! Item handlers. Items are created and listed under their list, and
//! addressed by their own id afterwards.

use actix_web::{HttpResponse, web};

use tasklist_core::domain::{ItemId, ListId, NewTodoItem, UpdateItemInput};
use tasklist_shared::dto::{CreateItemRequest, UpdateItemRequest};
use tasklist_shared::{DataResponse, IdResponse, StatusResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/lists/{id}/items
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ListId>,
    body: web::Json<CreateItemRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let item = NewTodoItem {
        title: req.title,
        description: req.description,
        done: req.done,
    };

    let id = state
        .items
        .create(identity.user_id, path.into_inner(), item)
        .await?;

    Ok(HttpResponse::Created().json(IdResponse { id }))
}

/// GET /api/lists/{id}/items
pub async fn get_all(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ListId>,
) -> AppResult<HttpResponse> {
    let items = state
        .items
        .get_all(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(items)))
}

/// GET /api/items/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ItemId>,
) -> AppResult<HttpResponse> {
    let item = state
        .items
        .get_by_id(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// PUT /api/items/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ItemId>,
    body: web::Json<UpdateItemRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    state
        .items
        .update(
            identity.user_id,
            path.into_inner(),
            UpdateItemInput {
                title: req.title,
                description: req.description,
                done: req.done,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// DELETE /api/items/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<ItemId>,
) -> AppResult<HttpResponse> {
    state
        .items
        .delete(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

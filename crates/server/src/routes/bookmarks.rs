use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use service::bookmark_service;

use super::extract::UserId;
use super::ServerState;
use crate::errors::JsonApiError;

pub async fn create_bookmark(
    State(state): State<ServerState>,
    Path(camp_id): Path<i64>,
    UserId(user_id): UserId,
) -> Result<(StatusCode, Json<models::bookmark::Model>), JsonApiError> {
    let saved = bookmark_service::create_bookmark(&state.db, user_id, camp_id).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn delete_bookmark(
    State(state): State<ServerState>,
    Path(camp_id): Path<i64>,
    UserId(user_id): UserId,
) -> Result<StatusCode, JsonApiError> {
    bookmark_service::delete_bookmark(&state.db, user_id, camp_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_bookmarks(
    State(state): State<ServerState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<models::bookmark::Model>>, JsonApiError> {
    let rows = bookmark_service::list_bookmarks(&state.db, user_id).await?;
    Ok(Json(rows))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use service::user_service;

use super::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub nickname: String,
    pub email: Option<String>,
}

pub async fn create_user(
    State(state): State<ServerState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<models::users::Model>), JsonApiError> {
    let created = user_service::create_user(&state.db, &req.nickname, req.email.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use common::pagination::Pagination;
use service::review_service::{self, NewReview, ReviewPage, ReviewPatch, ReviewSort};

use super::extract::UserId;
use super::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub camp_id: i64,
    pub content: String,
    pub rating: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub content: Option<String>,
    pub rating: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort: Option<String>,
}

impl ListParams {
    fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination {
            page: self.page.unwrap_or(d.page),
            per_page: self.per_page.unwrap_or(d.per_page),
        }
    }
}

pub async fn create_review(
    State(state): State<ServerState>,
    UserId(user_id): UserId,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<models::review::Model>), JsonApiError> {
    let input = NewReview {
        camp_id: req.camp_id,
        user_id,
        content: req.content,
        rating: req.rating,
        image_url: req.image_url,
    };
    let saved = review_service::create_review(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update_review(
    State(state): State<ServerState>,
    Path(review_id): Path<i64>,
    UserId(user_id): UserId,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<Json<models::review::Model>, JsonApiError> {
    let patch = ReviewPatch {
        content: req.content,
        rating: req.rating,
        image_url: req.image_url,
    };
    let updated = review_service::update_review(&state.db, review_id, patch, user_id).await?;
    Ok(Json(updated))
}

pub async fn delete_review(
    State(state): State<ServerState>,
    Path(review_id): Path<i64>,
    UserId(user_id): UserId,
) -> Result<StatusCode, JsonApiError> {
    review_service::delete_review(&state.db, review_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_reviews_by_camp(
    State(state): State<ServerState>,
    Path(camp_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Result<Json<ReviewPage>, JsonApiError> {
    let sort = ReviewSort::from_param(params.sort.as_deref());
    let page =
        review_service::list_reviews_by_camp(&state.db, camp_id, params.pagination(), sort).await?;
    Ok(Json(page))
}

pub async fn list_my_reviews(
    State(state): State<ServerState>,
    UserId(user_id): UserId,
    Query(params): Query<ListParams>,
) -> Result<Json<ReviewPage>, JsonApiError> {
    let page = review_service::list_my_reviews(&state.db, user_id, params.pagination()).await?;
    Ok(Json(page))
}

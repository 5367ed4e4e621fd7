use axum::{
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod bookmarks;
pub mod camps;
pub mod extract;
pub mod reviews;
pub mod users;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new().route("/health", get(health));

    let api = Router::new()
        .route("/api/users", post(users::create_user))
        .route("/api/users/me/reviews", get(reviews::list_my_reviews))
        .route("/api/users/me/bookmarks", get(bookmarks::list_bookmarks))
        .route("/api/reviews", post(reviews::create_review))
        .route(
            "/api/reviews/:review_id",
            put(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/api/camps/:camp_id/reviews", get(reviews::list_reviews_by_camp))
        .route("/api/camps/:camp_id/summary", get(camps::get_camp_summary))
        .route(
            "/api/camps/:camp_id/bookmarks",
            post(bookmarks::create_bookmark).delete(bookmarks::delete_bookmark),
        );

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

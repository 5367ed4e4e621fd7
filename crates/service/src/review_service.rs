//! Review mutations and queries.
//!
//! Every mutation executes inside one transaction so the review row, the
//! author's `my_review` index, the rating histogram, and the campsite summary
//! move together or not at all.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::Serialize;
use tracing::{error, info, warn};

use models::{camping_summary, my_review, rating_summary, review, users};

use crate::errors::ServiceError;
use common::pagination::Pagination;

/// Input for `create_review`.
#[derive(Clone, Debug)]
pub struct NewReview {
    pub camp_id: i64,
    pub user_id: i64,
    pub content: String,
    pub rating: i32,
    pub image_url: Option<String>,
}

/// Partial update for `update_review`: content and image are replaced only
/// when a non-empty value is supplied; rating is always replaced.
#[derive(Clone, Debug, Default)]
pub struct ReviewPatch {
    pub content: Option<String>,
    pub rating: i32,
    pub image_url: Option<String>,
}

/// A review as returned to callers, enriched with the author's nickname.
#[derive(Clone, Debug, Serialize)]
pub struct ReviewView {
    pub review_id: i64,
    pub camp_id: i64,
    pub user_id: i64,
    pub user_nickname: Option<String>,
    pub content: String,
    pub rating: i32,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub modified_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl ReviewView {
    fn from_review(review: review::Model, user_nickname: Option<String>) -> Self {
        Self {
            review_id: review.review_id,
            camp_id: review.camp_id,
            user_id: review.user_id,
            user_nickname,
            content: review.content,
            rating: review.rating,
            image_url: review.image_url,
            created_at: review.created_at,
            modified_at: review.modified_at,
        }
    }
}

/// One page of enriched reviews.
#[derive(Clone, Debug, Serialize)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewView>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Listing order for `list_reviews_by_camp`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReviewSort {
    #[default]
    Newest,
    Rating,
}

impl ReviewSort {
    /// Parse a query-string value; unknown values fall back to newest.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("rating") => Self::Rating,
            _ => Self::Newest,
        }
    }
}

/// Create a review and bring all aggregates along.
///
/// Fails with `AlreadyExists` when the user has already reviewed the campsite;
/// the unique (user_id, camp_id) index catches the race two concurrent creates
/// would otherwise win together.
pub async fn create_review(db: &DatabaseConnection, input: NewReview) -> Result<review::Model, ServiceError> {
    info!(user_id = input.user_id, camp_id = input.camp_id, "creating review");

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    if review::exists_by_user_and_camp(&txn, input.user_id, input.camp_id).await? {
        warn!(user_id = input.user_id, camp_id = input.camp_id, "review already exists");
        return Err(ServiceError::AlreadyExists(
            "a review for this campsite already exists".into(),
        ));
    }

    let saved = review::create(
        &txn,
        input.camp_id,
        input.user_id,
        &input.content,
        input.rating,
        input.image_url.as_deref(),
    )
    .await?;
    info!(review_id = saved.review_id, "review saved");

    my_review::add_review(&txn, saved.user_id, saved.review_id).await?;
    rating_summary::increment_bucket(&txn, saved.camp_id, saved.rating).await?;
    camping_summary::increment_review_cnt(&txn, saved.camp_id).await?;
    info!(camp_id = saved.camp_id, rating = saved.rating, "aggregates updated");

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(saved)
}

/// Update a review owned by `user_id`, moving the rating histogram from the
/// old bucket to the new one.
pub async fn update_review(
    db: &DatabaseConnection,
    review_id: i64,
    patch: ReviewPatch,
    user_id: i64,
) -> Result<review::Model, ServiceError> {
    review::validate_rating(patch.rating)?;

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let old = find_review(&txn, review_id).await?;
    verify_review_permission(&old, user_id)?;
    let old_rating = old.rating;
    let camp_id = old.camp_id;

    let updated = apply_patch(&txn, old, &patch).await?;

    // two bucket operations, not a move; the transaction hides the gap
    adjust_rating(&txn, camp_id, old_rating, updated.rating).await?;

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(review_id, old_rating, new_rating = updated.rating, "review updated");
    Ok(updated)
}

/// Delete a review owned by `user_id`, unwinding every aggregate before the
/// row itself goes away.
pub async fn delete_review(db: &DatabaseConnection, review_id: i64, user_id: i64) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let found = find_review(&txn, review_id).await?;
    verify_review_permission(&found, user_id)?;

    let touched = camping_summary::decrement_review_cnt(&txn, found.camp_id).await?;
    if touched == 0 {
        // a review existed, so the summary must exist; this is corruption
        error!(camp_id = found.camp_id, "camping summary missing on delete");
        return Err(ServiceError::Inconsistent(format!(
            "camping summary missing for camp {}",
            found.camp_id
        )));
    }

    let touched = rating_summary::decrement_bucket(&txn, found.camp_id, found.rating).await?;
    if touched == 0 {
        warn!(camp_id = found.camp_id, rating = found.rating, "rating bucket already empty on delete");
    }

    my_review::remove_review(&txn, user_id, review_id).await?;
    review::delete_by_id(&txn, review_id).await?;

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(review_id, camp_id = found.camp_id, "review deleted");
    Ok(())
}

/// Paginated reviews for a campsite, newest first by default, each enriched
/// with the author's nickname.
pub async fn list_reviews_by_camp(
    db: &DatabaseConnection,
    camp_id: i64,
    opts: Pagination,
    sort: ReviewSort,
) -> Result<ReviewPage, ServiceError> {
    let (page_idx, per_page) = opts.normalize();

    let mut query = review::Entity::find().filter(review::Column::CampId.eq(camp_id));
    query = match sort {
        ReviewSort::Newest => query.order_by_desc(review::Column::CreatedAt),
        ReviewSort::Rating => query
            .order_by_desc(review::Column::Rating)
            .order_by_desc(review::Column::CreatedAt),
    };

    let paginator = query.paginate(db, per_page);
    let totals = paginator
        .num_items_and_pages()
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let rows = paginator
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let reviews = enrich_with_nicknames(db, rows).await?;
    Ok(ReviewPage {
        reviews,
        page: page_idx + 1,
        per_page,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

/// The calling user's own reviews, resolved through the `my_review` index.
pub async fn list_my_reviews(
    db: &DatabaseConnection,
    user_id: i64,
    opts: Pagination,
) -> Result<ReviewPage, ServiceError> {
    let (page_idx, per_page) = opts.normalize();

    let ids = match my_review::find_by_user(db, user_id).await? {
        Some(index) => my_review::review_ids(&index),
        None => Vec::new(),
    };

    if ids.is_empty() {
        return Ok(ReviewPage {
            reviews: Vec::new(),
            page: page_idx + 1,
            per_page,
            total_items: 0,
            total_pages: 0,
        });
    }

    let paginator = review::Entity::find()
        .filter(review::Column::ReviewId.is_in(ids))
        .order_by_desc(review::Column::CreatedAt)
        .paginate(db, per_page);
    let totals = paginator
        .num_items_and_pages()
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let rows = paginator
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let reviews = enrich_with_nicknames(db, rows).await?;
    Ok(ReviewPage {
        reviews,
        page: page_idx + 1,
        per_page,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

async fn enrich_with_nicknames(
    db: &DatabaseConnection,
    rows: Vec<review::Model>,
) -> Result<Vec<ReviewView>, ServiceError> {
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        let nickname = users::find_nickname_by_user_id(db, row.user_id).await?;
        views.push(ReviewView::from_review(row, nickname));
    }
    Ok(views)
}

async fn find_review(txn: &DatabaseTransaction, review_id: i64) -> Result<review::Model, ServiceError> {
    review::find_by_id(txn, review_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("review"))
}

fn verify_review_permission(review: &review::Model, user_id: i64) -> Result<(), ServiceError> {
    if review.user_id != user_id {
        return Err(ServiceError::Forbidden(
            "only the author may modify this review".into(),
        ));
    }
    Ok(())
}

async fn apply_patch(
    txn: &DatabaseTransaction,
    old: review::Model,
    patch: &ReviewPatch,
) -> Result<review::Model, ServiceError> {
    use sea_orm::{ActiveModelTrait, Set};

    fn non_empty(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
    }

    let content = non_empty(&patch.content).unwrap_or_else(|| old.content.clone());
    let image_url = non_empty(&patch.image_url).or_else(|| old.image_url.clone());

    let mut am: review::ActiveModel = old.into();
    am.content = Set(content);
    am.rating = Set(patch.rating);
    am.image_url = Set(image_url);
    am.modified_at = Set(Some(chrono::Utc::now().into()));
    am.update(txn).await.map_err(|e| ServiceError::Db(e.to_string()))
}

async fn adjust_rating(
    txn: &DatabaseTransaction,
    camp_id: i64,
    old_rating: i32,
    new_rating: i32,
) -> Result<(), ServiceError> {
    let touched = rating_summary::decrement_bucket(txn, camp_id, old_rating).await?;
    if touched == 0 {
        warn!(camp_id, rating = old_rating, "rating bucket already empty on update");
    }
    rating_summary::increment_bucket(txn, camp_id, new_rating).await?;
    Ok(())
}

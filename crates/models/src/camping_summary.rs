//! Per-campsite aggregate of review and bookmark counts, maintained
//! incrementally by the services rather than recomputed.
use sea_orm::sea_query::Expr;
use sea_orm::{entity::prelude::*, ColumnTrait, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "camping_summary")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub camp_id: i64,
    pub review_cnt: i32,
    pub bookmark_cnt: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_camp<C: ConnectionTrait>(db: &C, camp_id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(camp_id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

async fn increment<C: ConnectionTrait>(
    db: &C,
    camp_id: i64,
    col: Column,
    initial: (i32, i32),
) -> Result<(), ModelError> {
    let res = Entity::update_many()
        .col_expr(col, Expr::col(col).add(1))
        .filter(Column::CampId.eq(camp_id))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        let am = ActiveModel {
            camp_id: Set(camp_id),
            review_cnt: Set(initial.0),
            bookmark_cnt: Set(initial.1),
        };
        am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    }
    Ok(())
}

async fn decrement<C: ConnectionTrait>(db: &C, camp_id: i64, col: Column) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(col, Expr::col(col).sub(1))
        .filter(Column::CampId.eq(camp_id))
        .filter(col.gt(0))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Bump the review count, creating the summary at (1, 0) on the campsite's
/// first review.
pub async fn increment_review_cnt<C: ConnectionTrait>(db: &C, camp_id: i64) -> Result<(), ModelError> {
    increment(db, camp_id, Column::ReviewCnt, (1, 0)).await
}

/// Drop the review count. Zero rows touched means the summary is missing,
/// which the caller treats as an invariant violation.
pub async fn decrement_review_cnt<C: ConnectionTrait>(db: &C, camp_id: i64) -> Result<u64, ModelError> {
    decrement(db, camp_id, Column::ReviewCnt).await
}

/// Bump the bookmark count, creating the summary at (0, 1) on the campsite's
/// first bookmark.
pub async fn increment_bookmark_cnt<C: ConnectionTrait>(db: &C, camp_id: i64) -> Result<(), ModelError> {
    increment(db, camp_id, Column::BookmarkCnt, (0, 1)).await
}

pub async fn decrement_bookmark_cnt<C: ConnectionTrait>(db: &C, camp_id: i64) -> Result<u64, ModelError> {
    decrement(db, camp_id, Column::BookmarkCnt).await
}
